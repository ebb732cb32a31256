// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `txkeep clean` - manual cleanup pass

use super::{open_log, open_store};
use crate::config::CliConfig;
use anyhow::Result;
use txkeep_core::SystemClock;
use txkeep_engine::ManualCleaner;

pub async fn handle(config: &CliConfig) -> Result<()> {
    let cleaner = ManualCleaner::new(
        &config.tracker,
        open_log(config)?,
        open_store(config)?,
        SystemClock,
    )?;
    let report = cleaner.clean().await?;

    println!(
        "deleted {} records before {}",
        report.deleted, report.delete_before
    );
    if let Some(author) = &report.watermark.pinned_by {
        println!("watermark {} held by {}", report.watermark.timestamp, author);
    }
    Ok(())
}
