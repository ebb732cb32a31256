// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Merge sinks: destinations applying transactions to live state

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSink;

use async_trait::async_trait;
use thiserror::Error;
use txkeep_core::Transaction;

/// Errors from applying a transaction
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rejected: {0}")]
    Rejected(String),
}

/// A destination for merged transactions
///
/// Sinks are held as trait objects so one tracker can feed several kinds.
#[async_trait]
pub trait MergeSink: Send + Sync {
    /// Name used in logs and failure reports
    fn name(&self) -> &str;

    async fn apply(&self, tx: &Transaction) -> Result<(), SinkError>;
}
