// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Merge pass: pull unseen records into every sink, then advance the cursor

use crate::error::TrackingError;
use crate::offset::OffsetTracker;
use std::sync::Arc;
use txkeep_adapters::{KvStore, MergeSink, TransactionLog};
use txkeep_core::{AuthorName, LogLevel, LogQuery, Timestamp};

/// Outcome of one merge pass
#[derive(Debug)]
pub struct MergeReport {
    /// Records handed to the sinks
    pub merged: usize,
    /// Current author's cursor after the pass
    pub cursor: Timestamp,
    /// Per-sink apply failures; these do not fail the pass
    pub failures: Vec<TrackingError>,
}

/// Merges other authors' records for the current author
pub struct Merger<L, K> {
    log: L,
    offsets: OffsetTracker<K>,
    sinks: Vec<Arc<dyn MergeSink>>,
    author: AuthorName,
    include_mirroring: bool,
    level: LogLevel,
}

impl<L: TransactionLog, K: KvStore> Merger<L, K> {
    pub fn new(
        log: L,
        offsets: OffsetTracker<K>,
        sinks: Vec<Arc<dyn MergeSink>>,
        author: AuthorName,
        include_mirroring: bool,
        level: LogLevel,
    ) -> Self {
        Self {
            log,
            offsets,
            sinks,
            author,
            include_mirroring,
            level,
        }
    }

    pub fn author(&self) -> &AuthorName {
        &self.author
    }

    /// Run one merge pass
    ///
    /// A fetch failure leaves the cursor untouched, so the same range is
    /// fetched again on the next pass. A cursor read failure aborts the
    /// pass before anything is fetched. Sink failures are isolated: every
    /// sink still sees every record and the cursor still advances.
    pub async fn merge(&self) -> Result<MergeReport, TrackingError> {
        let since = self.offsets.try_cursor(&self.author).await?;
        let query = LogQuery::since(since)
            .excluding_author(self.author.clone())
            .with_mirrored(self.include_mirroring);

        let mut records = self.log.fetch(&query).await.map_err(TrackingError::Fetch)?;
        records.sort_by_key(|tx| tx.timestamp);

        let mut failures = Vec::new();
        for sink in &self.sinks {
            for tx in &records {
                match sink.apply(tx).await {
                    Ok(()) => {
                        if self.level.shows_detail() {
                            tracing::debug!(
                                sink = sink.name(),
                                author = %tx.author,
                                timestamp = %tx.timestamp,
                                "applied"
                            );
                        }
                    }
                    Err(source) => {
                        let failure = TrackingError::Apply {
                            sink: sink.name().to_string(),
                            timestamp: tx.timestamp,
                            source,
                        };
                        if self.level.shows_status() {
                            tracing::warn!(error = %failure, "apply failed");
                        }
                        failures.push(failure);
                    }
                }
            }
        }

        let cursor = match records.last() {
            Some(last) => {
                if self.offsets.set_cursor(&self.author, last.timestamp).await? {
                    last.timestamp
                } else {
                    self.offsets.try_cursor(&self.author).await?
                }
            }
            None => since,
        };

        Ok(MergeReport {
            merged: records.len(),
            cursor,
            failures,
        })
    }
}

#[cfg(test)]
#[path = "merger_tests.rs"]
mod tests;
