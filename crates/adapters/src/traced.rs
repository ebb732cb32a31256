// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced collaborator wrappers for consistent observability

use crate::kv::{KvError, KvStore};
use crate::log::{LogError, TransactionLog};
use async_trait::async_trait;
use tracing::Instrument;
use txkeep_core::{AuthorName, LogQuery, Origin, Timestamp, Transaction};

/// Wrapper that adds tracing to any TransactionLog
#[derive(Clone)]
pub struct TracedTransactionLog<L> {
    inner: L,
}

impl<L> TracedTransactionLog<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

#[async_trait]
impl<L: TransactionLog> TransactionLog for TracedTransactionLog<L> {
    async fn append(
        &self,
        author: &AuthorName,
        origin: Origin,
        payload: serde_json::Value,
    ) -> Result<Transaction, LogError> {
        let span = tracing::info_span!("log.append", author = %author, ?origin);
        async {
            let result = self.inner.append(author, origin, payload).await;
            match &result {
                Ok(tx) => tracing::debug!(timestamp = %tx.timestamp, "appended"),
                Err(e) => tracing::error!(error = %e, "append failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn fetch(&self, query: &LogQuery) -> Result<Vec<Transaction>, LogError> {
        let span = tracing::info_span!(
            "log.fetch",
            since = %query.since,
            exclude = ?query.exclude_author.as_ref().map(|a| a.as_str()),
            mirrored = query.include_mirrored,
        );
        async {
            let start = std::time::Instant::now();
            let result = self.inner.fetch(query).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(records) => tracing::debug!(
                    count = records.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "fetched"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "fetch failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn delete_before(&self, before: Timestamp) -> Result<usize, LogError> {
        let span = tracing::info_span!("log.delete_before", before = %before);
        async {
            let start = std::time::Instant::now();
            let result = self.inner.delete_before(before).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(deleted) => tracing::info!(
                    deleted,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "deleted"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "delete failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any KvStore
#[derive(Clone)]
pub struct TracedKvStore<K> {
    inner: K,
}

impl<K> TracedKvStore<K> {
    pub fn new(inner: K) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &K {
        &self.inner
    }
}

#[async_trait]
impl<K: KvStore> KvStore for TracedKvStore<K> {
    async fn get(&self, key: &str) -> Result<Option<u64>, KvError> {
        let result = self.inner.get(key).await;
        match &result {
            Ok(value) => tracing::trace!(key, ?value, "kv get"),
            Err(e) => tracing::warn!(key, error = %e, "kv get failed"),
        }
        result
    }

    async fn set(&self, key: &str, value: u64) -> Result<(), KvError> {
        let result = self.inner.set(key, value).await;
        match &result {
            Ok(()) => tracing::debug!(key, value, "kv set"),
            Err(e) => tracing::error!(key, value, error = %e, "kv set failed"),
        }
        result
    }

    async fn scan(&self, prefix: &str) -> Result<Vec<(String, u64)>, KvError> {
        let result = self.inner.scan(prefix).await;
        tracing::trace!(
            prefix,
            count = result.as_ref().map(|v| v.len()).ok(),
            "kv scan"
        );
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
