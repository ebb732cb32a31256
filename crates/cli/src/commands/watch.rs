// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `txkeep watch` - notify the tracker whenever the log file changes

use super::{deps, Log, Store};
use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use std::path::Path;
use std::time::{Duration, SystemTime};
use txkeep_core::SystemClock;
use txkeep_engine::TrackingCoordinator;

#[derive(Args)]
pub struct WatchArgs {
    /// How often to look at the log file
    #[arg(long, default_value = "500ms", value_parser = humantime::parse_duration)]
    pub interval: Duration,

    /// Start tracking even when the config sets `auto_start = false`
    #[arg(long)]
    pub start: bool,
}

type Coordinator = TrackingCoordinator<Log, Store, SystemClock>;

pub async fn handle(args: WatchArgs, config: &CliConfig) -> Result<()> {
    let coordinator = spawn_tracker(&args, config)?;
    println!("watching {}", config.storage.log.display());
    if !coordinator.is_running() {
        println!("tracking paused (auto_start = false); pass --start to run passes");
    }

    let mut ticker = tokio::time::interval(args.interval);
    let mut last_modified = None;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = ticker.tick() => {
                let modified = modified_at(&config.storage.log);
                if modified != last_modified {
                    last_modified = modified;
                    coordinator.notify();
                }
            }
        }
    }

    let passes = coordinator.passes();
    coordinator.shutdown().await;
    println!("stopped after {passes} passes");
    Ok(())
}

/// Spawn the coordinator, running only if the config or `--start` asks
fn spawn_tracker(args: &WatchArgs, config: &CliConfig) -> Result<Coordinator> {
    let coordinator = TrackingCoordinator::spawn(&config.tracker, deps(config)?)?;
    if args.start {
        coordinator.start();
    }
    Ok(coordinator)
}

fn modified_at(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
