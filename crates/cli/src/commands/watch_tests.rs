// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn config(dir: &tempfile::TempDir, extra: &str) -> CliConfig {
    CliConfig::parse(
        &format!(
            r#"
[tracker]
current_author = "app"
authors = ["app", "widget"]
{extra}

[storage]
log = "log.jsonl"
"#
        ),
        dir.path(),
    )
    .unwrap()
}

fn args(start: bool) -> WatchArgs {
    WatchArgs {
        interval: Duration::from_millis(500),
        start,
    }
}

#[tokio::test]
async fn auto_start_false_stays_paused() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir, "auto_start = false");

    let coordinator = spawn_tracker(&args(false), &config).unwrap();
    assert!(!coordinator.is_running());
    coordinator.shutdown().await;
}

#[tokio::test]
async fn start_flag_overrides_auto_start() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir, "auto_start = false");

    let coordinator = spawn_tracker(&args(true), &config).unwrap();
    assert!(coordinator.is_running());
    coordinator.shutdown().await;
}

#[tokio::test]
async fn auto_start_default_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir, "");

    let coordinator = spawn_tracker(&args(false), &config).unwrap();
    assert!(coordinator.is_running());
    coordinator.shutdown().await;
}
