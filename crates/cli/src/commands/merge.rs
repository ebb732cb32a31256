// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `txkeep merge` - one pass as the current author
//!
//! Runs the same pass a notification would: merge, then clean if the
//! configured strategy says so.

use super::deps;
use crate::config::CliConfig;
use anyhow::Result;
use txkeep_engine::{PassReport, TrackingCoordinator};

pub async fn handle(config: &CliConfig) -> Result<()> {
    let coordinator = TrackingCoordinator::spawn(&config.tracker, deps(config)?)?;
    let report = coordinator.run_pass().await;
    coordinator.shutdown().await;
    print_report(report)
}

pub fn print_report(report: PassReport) -> Result<()> {
    if let Some(clean) = report.clean {
        match clean {
            Ok(clean) => println!(
                "cleaned {} records before {}",
                clean.deleted, clean.delete_before
            ),
            Err(e) => eprintln!("warning: {e}"),
        }
    }

    let merge = report.merge?;
    for failure in &merge.failures {
        eprintln!("warning: {failure}");
    }
    println!("merged {} records, cursor at {}", merge.merged, merge.cursor);
    Ok(())
}
