// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod append;
pub mod clean;
pub mod merge;
pub mod status;
pub mod watch;

use crate::config::CliConfig;
use anyhow::Result;
use txkeep_adapters::{TracedKvStore, TracedTransactionLog};
use txkeep_core::SystemClock;
use txkeep_engine::TrackerDeps;
use txkeep_storage::{FileTransactionLog, JsonKvStore, JsonlSink};

pub type Log = TracedTransactionLog<FileTransactionLog>;
pub type Store = TracedKvStore<JsonKvStore>;

pub fn open_log(config: &CliConfig) -> Result<Log> {
    Ok(TracedTransactionLog::new(FileTransactionLog::open(
        &config.storage.log,
    )?))
}

pub fn open_store(config: &CliConfig) -> Result<Store> {
    Ok(TracedKvStore::new(JsonKvStore::open(&config.storage.state)?))
}

/// File-backed collaborators described by `config`
pub fn deps(config: &CliConfig) -> Result<TrackerDeps<Log, Store, SystemClock>> {
    let mut deps = TrackerDeps::new(open_log(config)?, open_store(config)?, SystemClock);
    for path in &config.storage.sinks {
        deps = deps.with_sink(JsonlSink::new(path));
    }
    Ok(deps)
}
