// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cleanup pass: delete records every regular author has consumed

use crate::error::TrackingError;
use crate::keys::StateKeys;
use crate::offset::OffsetTracker;
use crate::watermark::{Watermark, WatermarkCalculator};
use std::time::Duration;
use txkeep_adapters::{KvStore, TransactionLog};
use txkeep_core::{Clock, ConfigError, LogLevel, Timestamp, TrackerConfig};

/// Outcome of one cleanup pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub watermark: Watermark,
    /// `now - maximum_duration`
    pub floor: Timestamp,
    /// Records strictly older than this were deleted
    pub delete_before: Timestamp,
    pub deleted: usize,
}

pub struct Cleaner<L, K, C> {
    log: L,
    watermarks: WatermarkCalculator<K>,
    maximum_duration: Duration,
    clock: C,
    level: LogLevel,
}

impl<L: TransactionLog, K: KvStore, C: Clock> Cleaner<L, K, C> {
    pub fn new(
        log: L,
        watermarks: WatermarkCalculator<K>,
        maximum_duration: Duration,
        clock: C,
        level: LogLevel,
    ) -> Self {
        Self {
            log,
            watermarks,
            maximum_duration,
            clock,
            level,
        }
    }

    /// Run one cleanup pass
    ///
    /// Records older than `maximum_duration` are deleted even when a regular
    /// author has not consumed them yet.
    pub async fn clean(&self) -> Result<CleanReport, TrackingError> {
        let watermark = self.watermarks.compute().await;
        let floor = self.clock.now().saturating_sub(self.maximum_duration);
        let delete_before = watermark.timestamp.max(floor);

        let deleted = if delete_before.is_epoch() {
            0
        } else {
            self.log
                .delete_before(delete_before)
                .await
                .map_err(TrackingError::Delete)?
        };

        if self.level.shows_status() && floor > watermark.timestamp && deleted > 0 {
            tracing::info!(
                pinned_by = ?watermark.pinned_by.as_ref().map(|a| a.as_str()),
                watermark = %watermark.timestamp,
                %floor,
                "maximum duration forced deletion past watermark"
            );
        }
        if self.level.shows_detail() {
            tracing::debug!(%delete_before, deleted, "cleaned");
        }

        Ok(CleanReport {
            watermark,
            floor,
            delete_before,
            deleted,
        })
    }
}

/// Cleanup-only instance for hosts running the `none` strategy
///
/// Shares the configuration of the coordinator but never merges and never
/// consults a scheduler.
pub struct ManualCleaner<L, K, C> {
    cleaner: Cleaner<L, K, C>,
}

impl<L: TransactionLog, K: KvStore, C: Clock> ManualCleaner<L, K, C> {
    pub fn new(config: &TrackerConfig, log: L, store: K, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let roster = config.roster()?;
        let offsets = OffsetTracker::new(
            store,
            StateKeys::new(config.namespace.clone()),
            config.log_level,
        );
        let watermarks = WatermarkCalculator::new(offsets, roster, config.log_level);
        Ok(Self {
            cleaner: Cleaner::new(
                log,
                watermarks,
                config.maximum_duration,
                clock,
                config.log_level,
            ),
        })
    }

    pub async fn clean(&self) -> Result<CleanReport, TrackingError> {
        self.cleaner.clean().await
    }
}

#[cfg(test)]
#[path = "cleaner_tests.rs"]
mod tests;
