// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use txkeep_core::CleanStrategy;

#[test]
fn storage_paths_are_relative_to_config() {
    let config = CliConfig::parse(
        r#"
[tracker]
current_author = "app"
authors = ["app"]

[storage]
log = "data/log.jsonl"
sinks = ["state.jsonl", "/abs/other.jsonl"]
"#,
        Path::new("/srv/kit"),
    )
    .unwrap();

    assert_eq!(config.storage.log, PathBuf::from("/srv/kit/data/log.jsonl"));
    assert_eq!(
        config.storage.state,
        PathBuf::from("/srv/kit/txkeep-state.json")
    );
    assert_eq!(
        config.storage.sinks,
        vec![
            PathBuf::from("/srv/kit/state.jsonl"),
            PathBuf::from("/abs/other.jsonl")
        ]
    );
}

#[test]
fn tracker_table_is_passed_through() {
    let config = CliConfig::parse(
        r#"
[tracker]
current_author = "app"
authors = ["app", "widget"]
batch_authors = ["importer"]

[tracker.clean]
strategy = "by_notification"
times = 4
"#,
        Path::new("."),
    )
    .unwrap();

    assert_eq!(config.tracker.batch_authors.len(), 1);
    assert_eq!(
        config.tracker.clean,
        CleanStrategy::ByNotification { times: 4 }
    );
}

#[test]
fn invalid_roster_is_rejected() {
    let err = CliConfig::parse(
        r#"
[tracker]
current_author = "app"
authors = ["widget"]
"#,
        Path::new("."),
    )
    .unwrap_err();

    assert!(err.to_string().contains("app"), "{err}");
}

#[test]
fn unknown_storage_key_is_rejected() {
    let result = CliConfig::parse(
        r#"
[tracker]
current_author = "app"
authors = ["app"]

[storage]
logs = "x"
"#,
        Path::new("."),
    );

    assert!(result.is_err());
}
