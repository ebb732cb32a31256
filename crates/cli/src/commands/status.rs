// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `txkeep status` - cursors and the current deletion boundary

use super::{open_log, open_store};
use crate::config::CliConfig;
use anyhow::Result;
use txkeep_core::{AuthorRole, Clock, SystemClock, Timestamp};
use txkeep_engine::{OffsetTracker, StateKeys, WatermarkCalculator};

pub async fn handle(config: &CliConfig) -> Result<()> {
    let tracker = &config.tracker;
    let roster = tracker.roster()?;
    let records = open_log(config)?.inner().len()?;
    let offsets = OffsetTracker::new(
        open_store(config)?,
        StateKeys::new(tracker.namespace.clone()),
        tracker.log_level,
    );
    let cursors = offsets.all_cursors().await?;

    println!(
        "author {} (namespace {})",
        roster.current(),
        tracker.namespace
    );
    println!("records {records}");
    println!("cursors");
    for author in roster.regular().chain(roster.batch()) {
        let role = match roster.role(author) {
            Some(AuthorRole::Current) => "current",
            Some(AuthorRole::Batch) => "batch",
            _ => "regular",
        };
        let cursor = cursors
            .get(author)
            .map(Timestamp::to_string)
            .unwrap_or_else(|| "never merged".to_string());
        println!("  {:<20} {:<8} {}", author.as_str(), role, cursor);
    }

    let watermark = WatermarkCalculator::new(offsets, roster, tracker.log_level)
        .compute()
        .await;
    let floor = SystemClock.now().saturating_sub(tracker.maximum_duration);
    println!("watermark {}", watermark.timestamp);
    if let Some(author) = &watermark.pinned_by {
        println!("  held by {author}");
    }
    println!("floor {floor}");
    println!("delete before {}", watermark.timestamp.max(floor));
    Ok(())
}
