// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory transaction log for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{LogError, TransactionLog};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use txkeep_core::{AuthorName, LogQuery, Origin, Timestamp, Transaction};

/// Recorded log call
#[derive(Debug, Clone, PartialEq)]
pub enum LogCall {
    Append { author: AuthorName },
    Fetch { query: LogQuery },
    DeleteBefore { before: Timestamp },
}

#[derive(Default)]
struct FakeLogState {
    records: Vec<Transaction>,
    calls: Vec<LogCall>,
    fail_fetch: bool,
    fail_delete: bool,
}

/// In-memory transaction log with call recording and failure injection
#[derive(Clone, Default)]
pub struct FakeTransactionLog {
    inner: Arc<Mutex<FakeLogState>>,
}

impl FakeTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record with an explicit timestamp
    pub fn insert(&self, author: &str, micros: u64, origin: Origin) {
        let Ok(author) = AuthorName::new(author) else {
            return;
        };
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.records.push(Transaction {
            author,
            timestamp: Timestamp::from_micros(micros),
            origin,
            payload: serde_json::json!({ "seq": micros }),
        });
        state.records.sort_by_key(|tx| tx.timestamp);
    }

    /// Make every following fetch fail (or succeed again)
    pub fn fail_fetches(&self, fail: bool) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail_fetch = fail;
    }

    /// Make every following delete fail (or succeed again)
    pub fn fail_deletes(&self, fail: bool) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail_delete = fail;
    }

    /// All records still in the log
    pub fn records(&self) -> Vec<Transaction> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .records
            .clone()
    }

    /// Timestamps of all records still in the log, in raw micros
    pub fn timestamps(&self) -> Vec<u64> {
        self.records()
            .iter()
            .map(|tx| tx.timestamp.as_micros())
            .collect()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<LogCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Number of delete calls that reached the log
    pub fn delete_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, LogCall::DeleteBefore { .. }))
            .count()
    }
}

#[async_trait]
impl TransactionLog for FakeTransactionLog {
    async fn append(
        &self,
        author: &AuthorName,
        origin: Origin,
        payload: serde_json::Value,
    ) -> Result<Transaction, LogError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(LogCall::Append {
            author: author.clone(),
        });

        let timestamp = state
            .records
            .last()
            .map(|tx| tx.timestamp.next())
            .unwrap_or(Timestamp::from_micros(1));
        let tx = Transaction {
            author: author.clone(),
            timestamp,
            origin,
            payload,
        };
        state.records.push(tx.clone());
        Ok(tx)
    }

    async fn fetch(&self, query: &LogQuery) -> Result<Vec<Transaction>, LogError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(LogCall::Fetch {
            query: query.clone(),
        });

        if state.fail_fetch {
            return Err(LogError::Unavailable("injected fetch failure".to_string()));
        }

        Ok(state
            .records
            .iter()
            .filter(|tx| query.matches(tx))
            .cloned()
            .collect())
    }

    async fn delete_before(&self, before: Timestamp) -> Result<usize, LogError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(LogCall::DeleteBefore { before });

        if state.fail_delete {
            return Err(LogError::Unavailable("injected delete failure".to_string()));
        }

        let len = state.records.len();
        state.records.retain(|tx| tx.timestamp >= before);
        Ok(len - state.records.len())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
