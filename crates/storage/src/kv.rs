// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file key-value store

use crate::file::{write_atomic, FileLock};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use txkeep_adapters::{KvError, KvStore};

/// Key-value store kept as one pretty-printed JSON object
#[derive(Clone)]
pub struct JsonKvStore {
    path: PathBuf,
}

impl JsonKvStore {
    /// Open a store at the given path; the file is created on first write
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, KvError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, u64>, KvError> {
        match fs::read_to_string(&self.path) {
            Ok(json) if json.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn get_blocking(&self, key: &str) -> Result<Option<u64>, KvError> {
        let _lock = FileLock::shared(&self.path)?;
        Ok(self.load()?.get(key).copied())
    }

    fn set_blocking(&self, key: &str, value: u64) -> Result<(), KvError> {
        let _lock = FileLock::exclusive(&self.path)?;
        let mut values = self.load()?;
        values.insert(key.to_string(), value);
        let json = serde_json::to_vec_pretty(&values)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    fn scan_blocking(&self, prefix: &str) -> Result<Vec<(String, u64)>, KvError> {
        let _lock = FileLock::shared(&self.path)?;
        Ok(self
            .load()?
            .into_iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect())
    }
}

fn join_error(e: tokio::task::JoinError) -> KvError {
    KvError::Unavailable(format!("store task failed: {}", e))
}

#[async_trait]
impl KvStore for JsonKvStore {
    async fn get(&self, key: &str) -> Result<Option<u64>, KvError> {
        let this = self.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || this.get_blocking(&key))
            .await
            .map_err(join_error)?
    }

    async fn set(&self, key: &str, value: u64) -> Result<(), KvError> {
        let this = self.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || this.set_blocking(&key, value))
            .await
            .map_err(join_error)?
    }

    async fn scan(&self, prefix: &str) -> Result<Vec<(String, u64)>, KvError> {
        let this = self.clone();
        let prefix = prefix.to_string();
        tokio::task::spawn_blocking(move || this.scan_blocking(&prefix))
            .await
            .map_err(join_error)?
    }
}

#[cfg(test)]
#[path = "kv_tests.rs"]
mod tests;
