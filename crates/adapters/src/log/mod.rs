// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared transaction log

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTransactionLog, LogCall};

use async_trait::async_trait;
use thiserror::Error;
use txkeep_core::{AuthorName, LogQuery, Origin, Timestamp, Transaction};

/// Errors from log operations
#[derive(Debug, Error)]
pub enum LogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("log unavailable: {0}")]
    Unavailable(String),
}

/// Append-only, multi-writer transaction log
#[async_trait]
pub trait TransactionLog: Clone + Send + Sync + 'static {
    /// Append a record; the log assigns its timestamp
    async fn append(
        &self,
        author: &AuthorName,
        origin: Origin,
        payload: serde_json::Value,
    ) -> Result<Transaction, LogError>;

    /// Records matching the query, in ascending timestamp order
    async fn fetch(&self, query: &LogQuery) -> Result<Vec<Transaction>, LogError>;

    /// Delete every record with `timestamp < before`, returning how many went
    async fn delete_before(&self, before: Timestamp) -> Result<usize, LogError>;
}
