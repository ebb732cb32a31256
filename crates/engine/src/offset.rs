// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-author cursors

use crate::error::TrackingError;
use crate::keys::StateKeys;
use std::collections::BTreeMap;
use txkeep_adapters::{KvError, KvStore};
use txkeep_core::{AuthorName, LogLevel, Timestamp};

/// Reads and advances per-author cursors in the shared store
#[derive(Clone)]
pub struct OffsetTracker<K> {
    store: K,
    keys: StateKeys,
    level: LogLevel,
}

impl<K: KvStore> OffsetTracker<K> {
    pub fn new(store: K, keys: StateKeys, level: LogLevel) -> Self {
        Self { store, keys, level }
    }

    /// Last merge timestamp for `author`, or the epoch if it never merged
    ///
    /// Read failures degrade to the epoch: a merge then re-reads from the
    /// start and a cleanup deletes nothing on this author's behalf.
    pub async fn cursor(&self, author: &AuthorName) -> Timestamp {
        match self.store.get(&self.keys.cursor(author)).await {
            Ok(value) => value.map(Timestamp::from).unwrap_or(Timestamp::EPOCH),
            Err(e) => {
                if self.level.shows_status() {
                    tracing::warn!(%author, error = %e, "cursor read failed, using epoch");
                }
                Timestamp::EPOCH
            }
        }
    }

    /// Like [`cursor`](Self::cursor), but a read failure is an error
    ///
    /// Merging must use this: reading from the epoch after a failed read
    /// would hand every record to the sinks again.
    pub async fn try_cursor(&self, author: &AuthorName) -> Result<Timestamp, TrackingError> {
        self.store
            .get(&self.keys.cursor(author))
            .await
            .map(|value| value.map(Timestamp::from).unwrap_or(Timestamp::EPOCH))
            .map_err(|source| TrackingError::CursorRead {
                author: author.clone(),
                source,
            })
    }

    /// Move `author`'s cursor forward to `timestamp`
    ///
    /// Returns `Ok(false)` without writing when `timestamp` is not newer than
    /// the stored cursor; cursors never regress.
    pub async fn set_cursor(
        &self,
        author: &AuthorName,
        timestamp: Timestamp,
    ) -> Result<bool, TrackingError> {
        let key = self.keys.cursor(author);
        let persist_error = |source| TrackingError::CursorPersist {
            author: author.clone(),
            source,
        };

        // A failed read must not be mistaken for "no cursor yet"
        let stored = self.store.get(&key).await.map_err(persist_error)?;
        let current = stored.map(Timestamp::from).unwrap_or(Timestamp::EPOCH);

        if timestamp < current {
            if self.level.shows_status() {
                tracing::warn!(
                    %author,
                    stored = %current,
                    rejected = %timestamp,
                    "refusing to move cursor backwards"
                );
            }
            return Ok(false);
        }
        if stored.is_some() && timestamp == current {
            return Ok(false);
        }

        self.store
            .set(&key, timestamp.as_micros())
            .await
            .map_err(persist_error)?;
        if self.level.shows_detail() {
            tracing::debug!(%author, from = %current, to = %timestamp, "cursor advanced");
        }
        Ok(true)
    }

    /// Every persisted cursor in this namespace
    pub async fn all_cursors(&self) -> Result<BTreeMap<AuthorName, Timestamp>, KvError> {
        let entries = self.store.scan(&self.keys.cursor_prefix()).await?;
        Ok(entries
            .into_iter()
            .filter_map(|(key, value)| {
                self.keys
                    .cursor_author(&key)
                    .map(|author| (author, Timestamp::from(value)))
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "offset_tests.rs"]
mod tests;
