// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the tracking engine

use thiserror::Error;
use txkeep_adapters::{KvError, LogError, SinkError};
use txkeep_core::{AuthorName, Timestamp};

/// Failures surfaced by merge and cleanup passes
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("fetch failed: {0}")]
    Fetch(#[source] LogError),
    #[error("sink {sink} failed to apply transaction at {timestamp}: {source}")]
    Apply {
        sink: String,
        timestamp: Timestamp,
        #[source]
        source: SinkError,
    },
    #[error("delete failed: {0}")]
    Delete(#[source] LogError),
    #[error("cursor read failed for {author}: {source}")]
    CursorRead {
        author: AuthorName,
        #[source]
        source: KvError,
    },
    #[error("cursor persist failed for {author}: {source}")]
    CursorPersist {
        author: AuthorName,
        #[source]
        source: KvError,
    },
}
