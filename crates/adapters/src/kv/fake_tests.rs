// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn fake_kv_set_get() {
    let kv = FakeKvStore::new();
    assert_eq!(kv.get("a").await.unwrap(), None);

    kv.set("a", 7).await.unwrap();

    assert_eq!(kv.get("a").await.unwrap(), Some(7));
    assert_eq!(
        kv.calls()[1],
        KvCall::Set {
            key: "a".to_string(),
            value: 7
        }
    );
}

#[tokio::test]
async fn fake_kv_scan_is_prefix_bounded() {
    let kv = FakeKvStore::new();
    kv.put("ns.cursor.app", 1);
    kv.put("ns.cursor.widget", 2);
    kv.put("ns.cleanup.last", 3);
    kv.put("other.cursor.app", 4);

    let found = kv.scan("ns.cursor.").await.unwrap();

    assert_eq!(
        found,
        vec![
            ("ns.cursor.app".to_string(), 1),
            ("ns.cursor.widget".to_string(), 2)
        ]
    );
}

#[tokio::test]
async fn fake_kv_injected_write_failure_keeps_old_value() {
    let kv = FakeKvStore::new();
    kv.put("k", 1);
    kv.fail_writes(true);

    assert!(kv.set("k", 2).await.is_err());
    assert_eq!(kv.value("k"), Some(1));
}
