// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Safe deletion boundary across regular authors

use crate::offset::OffsetTracker;
use std::collections::BTreeMap;
use txkeep_adapters::KvStore;
use txkeep_core::{AuthorName, LogLevel, Roster, Timestamp};

/// Every regular author has consumed all records before `timestamp`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watermark {
    pub timestamp: Timestamp,
    /// Regular author holding the watermark down, if any
    pub pinned_by: Option<AuthorName>,
}

impl Watermark {
    pub fn epoch() -> Self {
        Self {
            timestamp: Timestamp::EPOCH,
            pinned_by: None,
        }
    }
}

/// Minimum cursor over `regular` authors
///
/// Authors without a cursor count as the epoch. Batch authors must not be
/// passed in; their cursors are irrelevant to deletion.
pub fn compute_watermark<'a>(
    regular: impl IntoIterator<Item = &'a AuthorName>,
    cursors: &BTreeMap<AuthorName, Timestamp>,
) -> Watermark {
    regular
        .into_iter()
        .map(|author| {
            let ts = cursors.get(author).copied().unwrap_or(Timestamp::EPOCH);
            (ts, author)
        })
        .min_by_key(|(ts, _)| *ts)
        .map(|(timestamp, author)| Watermark {
            timestamp,
            pinned_by: Some(author.clone()),
        })
        .unwrap_or_else(Watermark::epoch)
}

/// Computes the watermark from the persisted cursors
#[derive(Clone)]
pub struct WatermarkCalculator<K> {
    offsets: OffsetTracker<K>,
    roster: Roster,
    level: LogLevel,
}

impl<K: KvStore> WatermarkCalculator<K> {
    pub fn new(offsets: OffsetTracker<K>, roster: Roster, level: LogLevel) -> Self {
        Self {
            offsets,
            roster,
            level,
        }
    }

    pub async fn compute(&self) -> Watermark {
        let cursors = match self.offsets.all_cursors().await {
            Ok(cursors) => cursors,
            Err(e) => {
                if self.level.shows_status() {
                    tracing::warn!(error = %e, "cursor scan failed, holding watermark at epoch");
                }
                BTreeMap::new()
            }
        };

        let watermark = compute_watermark(self.roster.regular(), &cursors);
        if self.level.shows_detail() {
            tracing::debug!(
                watermark = %watermark.timestamp,
                pinned_by = ?watermark.pinned_by.as_ref().map(AuthorName::as_str),
                "watermark computed"
            );
        }
        watermark
    }
}

#[cfg(test)]
#[path = "watermark_tests.rs"]
mod tests;
