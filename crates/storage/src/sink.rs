// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Merge sink appending merged transactions to a JSONL file

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use txkeep_adapters::{MergeSink, SinkError};
use txkeep_core::Transaction;

/// Appends every merged transaction to a local JSONL file
pub struct JsonlSink {
    name: String,
    path: PathBuf,
}

impl JsonlSink {
    /// Sink named after the file it writes
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { name, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MergeSink for JsonlSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self, tx: &Transaction) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut line = serde_json::to_vec(tx)?;
        line.push(b'\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.sync_data().await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
