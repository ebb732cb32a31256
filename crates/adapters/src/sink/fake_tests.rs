// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use txkeep_core::{AuthorName, Origin};

fn tx(micros: u64) -> Transaction {
    Transaction {
        author: AuthorName::new("widget").unwrap(),
        timestamp: Timestamp::from_micros(micros),
        origin: Origin::Local,
        payload: serde_json::Value::Null,
    }
}

#[tokio::test]
async fn fake_sink_records_in_order() {
    let sink = FakeSink::new("main");
    sink.apply(&tx(1)).await.unwrap();
    sink.apply(&tx(2)).await.unwrap();

    assert_eq!(sink.name(), "main");
    assert_eq!(sink.applied_timestamps(), vec![1, 2]);
}

#[tokio::test]
async fn fake_sink_rejects_selected_timestamp() {
    let sink = FakeSink::new("main");
    sink.reject_at(2);

    assert!(sink.apply(&tx(1)).await.is_ok());
    let err = sink.apply(&tx(2)).await.unwrap_err();
    assert!(matches!(err, SinkError::Rejected(_)));
    assert!(sink.apply(&tx(3)).await.is_ok());
    assert_eq!(sink.applied_timestamps(), vec![1, 3]);
}

#[tokio::test]
async fn fake_sink_clones_share_state() {
    let sink = FakeSink::new("main");
    let clone = sink.clone();
    clone.apply(&tx(5)).await.unwrap();
    assert_eq!(sink.applied_timestamps(), vec![5]);
}
