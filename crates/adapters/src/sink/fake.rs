// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording merge sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{MergeSink, SinkError};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use txkeep_core::{Timestamp, Transaction};

#[derive(Default)]
struct FakeSinkState {
    applied: Vec<Transaction>,
    reject: HashSet<Timestamp>,
    reject_all: bool,
}

/// Records every applied transaction; can be told to reject some
#[derive(Clone)]
pub struct FakeSink {
    name: String,
    inner: Arc<Mutex<FakeSinkState>>,
}

impl FakeSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(Mutex::new(FakeSinkState::default())),
        }
    }

    /// Reject the transaction with this timestamp
    pub fn reject_at(&self, micros: u64) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .reject
            .insert(Timestamp::from_micros(micros));
    }

    pub fn reject_all(&self, reject: bool) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).reject_all = reject;
    }

    /// Transactions applied successfully, in application order
    pub fn applied(&self) -> Vec<Transaction> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .applied
            .clone()
    }

    pub fn applied_timestamps(&self) -> Vec<u64> {
        self.applied()
            .iter()
            .map(|tx| tx.timestamp.as_micros())
            .collect()
    }
}

#[async_trait]
impl MergeSink for FakeSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self, tx: &Transaction) -> Result<(), SinkError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if state.reject_all || state.reject.contains(&tx.timestamp) {
            return Err(SinkError::Rejected(format!(
                "{} refused transaction at {}",
                self.name, tx.timestamp
            )));
        }
        state.applied.push(tx.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
