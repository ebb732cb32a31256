// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A directory holding one config file per author, all sharing a log and
/// a state file.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `<author>.toml` for a tracker acting as `author`
    pub fn write_config(&self, author: &str, extra: &str) -> PathBuf {
        let path = self.path().join(format!("{author}.toml"));
        let content = format!(
            r#"
[tracker]
current_author = "{author}"
authors = ["app", "widget"]
batch_authors = ["importer"]
namespace = "kit"
{extra}

[tracker.clean]
strategy = "none"

[storage]
log = "shared.log"
state = "state.json"
sinks = ["{author}-state.jsonl"]
"#
        );
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    pub fn txkeep(&self, config: &Path) -> Command {
        let mut cmd = Command::cargo_bin("txkeep").expect("txkeep binary");
        cmd.current_dir(self.path()).arg("--config").arg(config);
        cmd
    }

    pub fn append(&self, config: &Path, author: &str, payload: &str) {
        self.txkeep(config)
            .args(["append", "--author", author, payload])
            .assert()
            .success();
    }

    /// Lines written to an author's merge sink
    pub fn sink_lines(&self, author: &str) -> Vec<serde_json::Value> {
        let path = self.path().join(format!("{author}-state.jsonl"));
        fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(|line| serde_json::from_str(line).expect("sink line is JSON"))
            .collect()
    }
}
