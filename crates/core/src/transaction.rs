// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transaction records and log queries

use crate::author::AuthorName;
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Where a transaction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Written by a local author
    #[default]
    Local,
    /// Imported by a remote-mirroring component
    Mirrored,
}

/// A single record in the shared transaction log
///
/// The payload is opaque to the tracker; only sinks interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub author: AuthorName,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub origin: Origin,
    pub payload: serde_json::Value,
}

/// Selects the records a merge pass still has to see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Only records strictly after this timestamp
    pub since: Timestamp,
    /// Records by this author are skipped
    pub exclude_author: Option<AuthorName>,
    /// Whether mirrored imports are returned
    pub include_mirrored: bool,
}

impl LogQuery {
    /// Everything after `since`, from every author and origin
    pub fn since(since: Timestamp) -> Self {
        Self {
            since,
            exclude_author: None,
            include_mirrored: true,
        }
    }

    pub fn excluding_author(mut self, author: AuthorName) -> Self {
        self.exclude_author = Some(author);
        self
    }

    pub fn with_mirrored(mut self, include: bool) -> Self {
        self.include_mirrored = include;
        self
    }

    /// Check a record against the query
    pub fn matches(&self, tx: &Transaction) -> bool {
        if tx.timestamp <= self.since {
            return false;
        }
        if self.exclude_author.as_ref() == Some(&tx.author) {
            return false;
        }
        self.include_mirrored || tx.origin != Origin::Mirrored
    }
}

#[cfg(test)]
#[path = "transaction_tests.rs"]
mod tests;
