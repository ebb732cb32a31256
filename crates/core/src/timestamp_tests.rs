// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn epoch_is_the_smallest_timestamp() {
    assert!(Timestamp::EPOCH.is_epoch());
    assert!(Timestamp::EPOCH < Timestamp::from_micros(1));
    assert_eq!(Timestamp::default(), Timestamp::EPOCH);
}

#[test]
fn saturating_sub_stops_at_epoch() {
    let ts = Timestamp::from_micros(5_000_000);
    assert_eq!(
        ts.saturating_sub(Duration::from_secs(2)),
        Timestamp::from_micros(3_000_000)
    );
    assert_eq!(ts.saturating_sub(Duration::from_secs(60)), Timestamp::EPOCH);
    assert_eq!(ts.saturating_sub(Duration::MAX), Timestamp::EPOCH);
}

#[test]
fn duration_since_is_zero_when_earlier_is_later() {
    let a = Timestamp::from_micros(100);
    let b = Timestamp::from_micros(400);
    assert_eq!(b.duration_since(a), Duration::from_micros(300));
    assert_eq!(a.duration_since(b), Duration::ZERO);
}

#[test]
fn serializes_as_bare_integer() {
    let json = serde_json::to_string(&Timestamp::from_micros(42)).unwrap();
    assert_eq!(json, "42");
    let back: Timestamp = serde_json::from_str("42").unwrap();
    assert_eq!(back, Timestamp::from_micros(42));
}

#[test]
fn from_system_time_before_epoch_is_epoch() {
    let before = UNIX_EPOCH - Duration::from_secs(1);
    assert_eq!(Timestamp::from_system_time(before), Timestamp::EPOCH);
}

#[test]
fn from_system_time_saturates_past_u64_micros() {
    let secs = u64::MAX / 1_000_000 + 1;
    // Platforms with a narrower SystemTime cannot represent this instant
    let Some(far) = UNIX_EPOCH.checked_add(Duration::from_secs(secs)) else {
        return;
    };
    assert_eq!(Timestamp::from_system_time(far), Timestamp::from_micros(u64::MAX));
}

proptest::proptest! {
    #[test]
    fn sub_then_add_never_lands_before_start(micros in 0u64..u64::MAX / 2, secs in 0u64..1_000_000) {
        let ts = Timestamp::from_micros(micros);
        let back = ts.saturating_sub(Duration::from_secs(secs)).saturating_add(Duration::from_secs(secs));
        proptest::prop_assert!(back >= ts);
        proptest::prop_assert!(ts.saturating_sub(Duration::from_secs(secs)) <= ts);
    }
}
