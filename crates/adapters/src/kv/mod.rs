// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable key-value persistence for cursors and cleanup state

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeKvStore, KvCall};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from key-value operations
#[derive(Debug, Error)]
pub enum KvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Integer-valued key-value store shared by every author
///
/// Values outlive the process. Implementations shared across processes are
/// responsible for their own cross-process consistency.
#[async_trait]
pub trait KvStore: Clone + Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<u64>, KvError>;

    async fn set(&self, key: &str, value: u64) -> Result<(), KvError>;

    /// Every stored key starting with `prefix`, with its value
    async fn scan(&self, prefix: &str) -> Result<Vec<(String, u64)>, KvError>;
}
