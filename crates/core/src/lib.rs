// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! txkeep-core: shared types for the txkeep transaction log tracker
//!
//! This crate provides:
//! - Wall-clock timestamps and a testable clock
//! - Author names and the typed author roster
//! - The transaction record model and log queries
//! - Tracker configuration

pub mod author;
pub mod clock;
pub mod config;
pub mod timestamp;
pub mod transaction;

pub use author::{AuthorName, AuthorRole, Roster};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{CleanStrategy, ConfigError, LogLevel, TrackerConfig};
pub use timestamp::Timestamp;
pub use transaction::{LogQuery, Origin, Transaction};
