// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `txkeep.toml` loading
//!
//! ```toml
//! [tracker]
//! current_author = "app"
//! authors = ["app", "widget"]
//!
//! [storage]
//! log = "txkeep.log"
//! state = "txkeep-state.json"
//! sinks = ["app-state.jsonl"]
//! ```
//!
//! Storage paths are relative to the directory holding the config file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use txkeep_core::TrackerConfig;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct StorageConfig {
    pub log: PathBuf,
    pub state: PathBuf,
    pub sinks: Vec<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            log: PathBuf::from("txkeep.log"),
            state: PathBuf::from("txkeep-state.json"),
            sinks: Vec::new(),
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&content, base).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse and validate, anchoring relative storage paths at `base`
    pub fn parse(content: &str, base: &Path) -> Result<Self> {
        let mut config: CliConfig = toml::from_str(content)?;
        config.tracker.validate()?;

        let storage = &mut config.storage;
        storage.log = base.join(&storage.log);
        storage.state = base.join(&storage.state);
        for sink in &mut storage.sinks {
            *sink = base.join(&*sink);
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
