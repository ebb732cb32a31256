// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory key-value store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{KvError, KvStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Recorded key-value call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvCall {
    Get { key: String },
    Set { key: String, value: u64 },
    Scan { prefix: String },
}

#[derive(Default)]
struct FakeKvState {
    values: BTreeMap<String, u64>,
    calls: Vec<KvCall>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory key-value store with call recording and failure injection
#[derive(Clone, Default)]
pub struct FakeKvStore {
    inner: Arc<Mutex<FakeKvState>>,
}

impl FakeKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without recording a call
    pub fn put(&self, key: &str, value: u64) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values
            .insert(key.to_string(), value);
    }

    /// Read a value without recording a call
    pub fn value(&self, key: &str) -> Option<u64> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values
            .get(key)
            .copied()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail_writes = fail;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<KvCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }
}

#[async_trait]
impl KvStore for FakeKvStore {
    async fn get(&self, key: &str) -> Result<Option<u64>, KvError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(KvCall::Get {
            key: key.to_string(),
        });
        if state.fail_reads {
            return Err(KvError::Unavailable("injected read failure".to_string()));
        }
        Ok(state.values.get(key).copied())
    }

    async fn set(&self, key: &str, value: u64) -> Result<(), KvError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(KvCall::Set {
            key: key.to_string(),
            value,
        });
        if state.fail_writes {
            return Err(KvError::Unavailable("injected write failure".to_string()));
        }
        state.values.insert(key.to_string(), value);
        Ok(())
    }

    async fn scan(&self, prefix: &str) -> Result<Vec<(String, u64)>, KvError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(KvCall::Scan {
            prefix: prefix.to_string(),
        });
        if state.fail_reads {
            return Err(KvError::Unavailable("injected read failure".to_string()));
        }
        Ok(state
            .values
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), *v))
            .collect())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
