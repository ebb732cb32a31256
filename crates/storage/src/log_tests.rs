// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use std::time::Duration;
use txkeep_core::FakeClock;

fn author(s: &str) -> AuthorName {
    AuthorName::new(s).unwrap()
}

fn open_log(dir: &tempfile::TempDir, clock: FakeClock) -> FileTransactionLog<FakeClock> {
    FileTransactionLog::with_clock(dir.path().join("log").join("tx.jsonl"), clock).unwrap()
}

#[tokio::test]
async fn append_then_fetch_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FakeClock::at(Timestamp::from_micros(1_000));
    let log = open_log(&dir, clock.clone());

    let first = log
        .append(&author("app"), Origin::Local, json!({"id": 1}))
        .await
        .unwrap();
    clock.advance(Duration::from_micros(10));
    let second = log
        .append(&author("widget"), Origin::Mirrored, json!({"id": 2}))
        .await
        .unwrap();

    let all = log.fetch(&LogQuery::since(Timestamp::EPOCH)).await.unwrap();
    assert_eq!(all, vec![first, second]);
    assert_eq!(log.len().unwrap(), 2);
}

#[tokio::test]
async fn timestamps_strictly_increase_on_a_stalled_clock() {
    let dir = tempfile::tempdir().unwrap();
    let log = open_log(&dir, FakeClock::at(Timestamp::from_micros(500)));

    let mut stamps = Vec::new();
    for i in 0..3 {
        let tx = log
            .append(&author("app"), Origin::Local, json!(i))
            .await
            .unwrap();
        stamps.push(tx.timestamp.as_micros());
    }

    assert_eq!(stamps, vec![500, 501, 502]);
}

#[tokio::test]
async fn fetch_applies_query_filters() {
    let dir = tempfile::tempdir().unwrap();
    let log = open_log(&dir, FakeClock::at(Timestamp::from_micros(100)));
    log.append(&author("app"), Origin::Local, json!(1)).await.unwrap();
    log.append(&author("widget"), Origin::Local, json!(2)).await.unwrap();
    log.append(&author("cloud"), Origin::Mirrored, json!(3)).await.unwrap();

    let query = LogQuery::since(Timestamp::EPOCH)
        .excluding_author(author("app"))
        .with_mirrored(false);
    let fetched = log.fetch(&query).await.unwrap();

    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].author, author("widget"));
}

#[tokio::test]
async fn delete_before_rewrites_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = open_log(&dir, FakeClock::at(Timestamp::from_micros(10)));
    for i in 0..4 {
        log.append(&author("app"), Origin::Local, json!(i)).await.unwrap();
    }

    let deleted = log.delete_before(Timestamp::from_micros(12)).await.unwrap();
    assert_eq!(deleted, 2);

    let left: Vec<_> = log
        .fetch(&LogQuery::since(Timestamp::EPOCH))
        .await
        .unwrap()
        .iter()
        .map(|tx| tx.timestamp.as_micros())
        .collect();
    assert_eq!(left, vec![12, 13]);

    // Nothing left to delete the second time
    assert_eq!(log.delete_before(Timestamp::from_micros(12)).await.unwrap(), 0);
}

#[tokio::test]
async fn appends_continue_after_deleting_everything() {
    let dir = tempfile::tempdir().unwrap();
    let log = open_log(&dir, FakeClock::at(Timestamp::from_micros(10)));
    log.append(&author("app"), Origin::Local, json!(0)).await.unwrap();
    log.delete_before(Timestamp::from_micros(100)).await.unwrap();

    assert!(log.is_empty().unwrap());
    let tx = log.append(&author("app"), Origin::Local, json!(1)).await.unwrap();
    assert_eq!(tx.timestamp, Timestamp::from_micros(10));
}

#[tokio::test]
async fn replay_stops_at_corrupt_line() {
    let dir = tempfile::tempdir().unwrap();
    let log = open_log(&dir, FakeClock::at(Timestamp::from_micros(10)));
    log.append(&author("app"), Origin::Local, json!(0)).await.unwrap();
    let valid = std::fs::read(log.path()).unwrap();

    // A torn write followed by a well-formed line from another process
    let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
    writeln!(file, "{{\"author\":\"app\",\"timest").unwrap();
    file.write_all(&valid).unwrap();
    drop(file);

    let all = log.fetch(&LogQuery::since(Timestamp::EPOCH)).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn append_after_torn_write_truncates_the_tail() {
    let dir = tempfile::tempdir().unwrap();
    let log = open_log(&dir, FakeClock::at(Timestamp::from_micros(10)));
    log.append(&author("app"), Origin::Local, json!(0)).await.unwrap();
    let valid_len = std::fs::metadata(log.path()).unwrap().len();

    // Crash mid-write: no trailing newline
    let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
    write!(file, "{{\"author\":\"app\",\"timest").unwrap();
    drop(file);

    let tx = log.append(&author("widget"), Origin::Local, json!(1)).await.unwrap();
    let all = log.fetch(&LogQuery::since(Timestamp::EPOCH)).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1], tx);

    // The torn bytes are gone; only whole records remain
    let contents = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.ends_with('\n'));
    let first = contents.lines().next().unwrap();
    assert_eq!(first.len() as u64 + 1, valid_len);

    let deleted = log.delete_before(Timestamp::from_micros(100)).await.unwrap();
    assert_eq!(deleted, 2);
    assert!(log.is_empty().unwrap());
}

#[tokio::test]
async fn delete_before_truncates_corrupt_tail() {
    let dir = tempfile::tempdir().unwrap();
    let log = open_log(&dir, FakeClock::at(Timestamp::from_micros(10)));
    log.append(&author("app"), Origin::Local, json!(0)).await.unwrap();

    let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
    writeln!(file, "not json").unwrap();
    drop(file);

    assert_eq!(log.delete_before(Timestamp::from_micros(5)).await.unwrap(), 0);
    let contents = std::fs::read_to_string(log.path()).unwrap();
    assert!(!contents.contains("not json"));
    assert_eq!(log.len().unwrap(), 1);
}

#[tokio::test]
async fn append_terminates_an_unterminated_valid_line() {
    let dir = tempfile::tempdir().unwrap();
    let log = open_log(&dir, FakeClock::at(Timestamp::from_micros(10)));
    log.append(&author("app"), Origin::Local, json!(0)).await.unwrap();

    // Drop the trailing newline of an otherwise valid record
    let mut contents = std::fs::read(log.path()).unwrap();
    contents.pop();
    std::fs::write(log.path(), &contents).unwrap();

    log.append(&author("widget"), Origin::Local, json!(1)).await.unwrap();
    assert_eq!(log.len().unwrap(), 2);
}

#[tokio::test]
async fn checksum_mismatch_is_not_replayed() {
    let dir = tempfile::tempdir().unwrap();
    let log = open_log(&dir, FakeClock::at(Timestamp::from_micros(10)));
    log.append(&author("app"), Origin::Local, json!({"v": 1})).await.unwrap();

    let contents = std::fs::read_to_string(log.path()).unwrap();
    std::fs::write(log.path(), contents.replace("\"v\":1", "\"v\":2")).unwrap();

    let all = log.fetch(&LogQuery::since(Timestamp::EPOCH)).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let log = open_log(&dir, FakeClock::new());

    assert!(log.is_empty().unwrap());
    assert_eq!(log.delete_before(Timestamp::from_micros(5)).await.unwrap(), 0);
}
