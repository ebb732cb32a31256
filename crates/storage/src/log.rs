// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checksummed JSONL transaction log
//!
//! One record per line. Each line carries a CRC32 of the serialized
//! transaction; replay stops at the first line that fails to parse or
//! verify, which is how a torn append from a crashed writer shows up.
//! Writers cut that tail off before appending or rewriting.

use crate::file::{write_atomic, FileLock};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use txkeep_adapters::{LogError, TransactionLog};
use txkeep_core::{AuthorName, Clock, LogQuery, Origin, SystemClock, Timestamp, Transaction};

/// A single line of the log file
#[derive(Debug, Serialize, Deserialize)]
struct LogEntry {
    #[serde(flatten)]
    tx: Transaction,
    checksum: u32,
}

impl LogEntry {
    fn new(tx: Transaction) -> Self {
        let checksum = Self::calculate_checksum(&tx);
        Self { tx, checksum }
    }

    fn calculate_checksum(tx: &Transaction) -> u32 {
        // Transaction only holds strings, integers and a JSON value, which always serialize
        let json = serde_json::to_string(tx).unwrap_or_default();
        crc32fast::hash(json.as_bytes())
    }

    fn verify(&self) -> bool {
        self.checksum == Self::calculate_checksum(&self.tx)
    }
}

/// Transaction log stored as a JSONL file shared between processes
#[derive(Clone)]
pub struct FileTransactionLog<C: Clock = SystemClock> {
    path: PathBuf,
    clock: C,
}

impl FileTransactionLog<SystemClock> {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LogError> {
        Self::with_clock(path, SystemClock)
    }
}

impl<C: Clock> FileTransactionLog<C> {
    /// Open or create a log at `path`, stamping appends with `clock`
    pub fn with_clock(path: impl Into<PathBuf>, clock: C) -> Result<Self, LogError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self { path, clock })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of readable records
    pub fn len(&self) -> Result<usize, LogError> {
        let _lock = FileLock::shared(&self.path)?;
        Ok(replay(&self.path)?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, LogError> {
        Ok(self.len()? == 0)
    }

    fn append_blocking(
        &self,
        author: &AuthorName,
        origin: Origin,
        payload: serde_json::Value,
    ) -> Result<Transaction, LogError> {
        let _lock = FileLock::exclusive(&self.path)?;
        let replay = self.repair()?;

        // Strictly increasing even when two writers share a clock tick
        let last = replay
            .records
            .last()
            .map(|tx| tx.timestamp)
            .unwrap_or(Timestamp::EPOCH);
        let timestamp = self.clock.now().max(last.next());

        let tx = Transaction {
            author: author.clone(),
            timestamp,
            origin,
            payload,
        };
        let line = serde_json::to_string(&LogEntry::new(tx.clone()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if replay.unterminated {
            writeln!(file)?;
        }
        writeln!(file, "{}", line)?;
        file.sync_all()?;

        Ok(tx)
    }

    /// Cut a torn or corrupt tail so later writes land where replay reaches
    ///
    /// Callers must hold the exclusive lock.
    fn repair(&self) -> Result<Replay, LogError> {
        let replay = replay(&self.path)?;
        if replay.torn {
            tracing::warn!(
                path = %self.path.display(),
                valid_len = replay.valid_len,
                "truncating log after last valid record"
            );
            let file = OpenOptions::new().write(true).open(&self.path)?;
            file.set_len(replay.valid_len)?;
            file.sync_all()?;
        }
        Ok(replay)
    }

    fn fetch_blocking(&self, query: &LogQuery) -> Result<Vec<Transaction>, LogError> {
        let _lock = FileLock::shared(&self.path)?;
        let mut records: Vec<_> = replay(&self.path)?
            .records
            .into_iter()
            .filter(|tx| query.matches(tx))
            .collect();
        records.sort_by_key(|tx| tx.timestamp);
        Ok(records)
    }

    fn delete_before_blocking(&self, before: Timestamp) -> Result<usize, LogError> {
        let _lock = FileLock::exclusive(&self.path)?;
        let records = self.repair()?.records;
        let total = records.len();

        let kept: Vec<_> = records
            .into_iter()
            .filter(|tx| tx.timestamp >= before)
            .collect();
        let deleted = total - kept.len();
        if deleted == 0 {
            return Ok(0);
        }

        let mut contents = Vec::new();
        for tx in kept {
            serde_json::to_writer(&mut contents, &LogEntry::new(tx))?;
            contents.push(b'\n');
        }
        write_atomic(&self.path, &contents)?;

        Ok(deleted)
    }
}

/// Valid prefix of a log file
#[derive(Default)]
struct Replay {
    records: Vec<Transaction>,
    /// Byte offset just past the last valid line
    valid_len: u64,
    /// The last valid line has no trailing newline
    unterminated: bool,
    /// Bytes past `valid_len` failed to parse or verify
    torn: bool,
}

/// Read every valid record, stopping at the first corrupt line
fn replay(path: &Path) -> Result<Replay, LogError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Replay::default()),
        Err(e) => return Err(e.into()),
    };

    let mut reader = BufReader::new(file);
    let mut replay = Replay::default();
    let mut position = 0u64;
    let mut line = Vec::new();
    let mut line_number = 0usize;

    loop {
        line.clear();
        let read = reader.read_until(b'\n', &mut line)?;
        if read == 0 {
            break;
        }
        line_number += 1;
        position += read as u64;

        if line.iter().all(u8::is_ascii_whitespace) {
            replay.valid_len = position;
            replay.unterminated = !line.ends_with(b"\n");
            continue;
        }
        match serde_json::from_slice::<LogEntry>(&line) {
            Ok(entry) if entry.verify() => {
                replay.records.push(entry.tx);
                replay.valid_len = position;
                replay.unterminated = !line.ends_with(b"\n");
            }
            Ok(_) => {
                tracing::warn!(line = line_number, "checksum mismatch, stopping log replay");
                replay.torn = true;
                break;
            }
            Err(e) => {
                tracing::warn!(line = line_number, error = %e, "unreadable entry, stopping log replay");
                replay.torn = true;
                break;
            }
        }
    }
    Ok(replay)
}

fn join_error(e: tokio::task::JoinError) -> LogError {
    LogError::Unavailable(format!("log task failed: {}", e))
}

#[async_trait]
impl<C: Clock> TransactionLog for FileTransactionLog<C> {
    async fn append(
        &self,
        author: &AuthorName,
        origin: Origin,
        payload: serde_json::Value,
    ) -> Result<Transaction, LogError> {
        let this = self.clone();
        let author = author.clone();
        tokio::task::spawn_blocking(move || this.append_blocking(&author, origin, payload))
            .await
            .map_err(join_error)?
    }

    async fn fetch(&self, query: &LogQuery) -> Result<Vec<Transaction>, LogError> {
        let this = self.clone();
        let query = query.clone();
        tokio::task::spawn_blocking(move || this.fetch_blocking(&query))
            .await
            .map_err(join_error)?
    }

    async fn delete_before(&self, before: Timestamp) -> Result<usize, LogError> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.delete_before_blocking(before))
            .await
            .map_err(join_error)?
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
