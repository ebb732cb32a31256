// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! txkeep tracking engine
//!
//! Merges unseen log records into local state, tracks how far every author
//! has read, and reclaims records once every regular author is past them.

mod cleaner;
mod coordinator;
mod error;
mod keys;
mod merger;
mod offset;
mod scheduler;
mod watermark;

pub use cleaner::{CleanReport, Cleaner, ManualCleaner};
pub use coordinator::{CoordinatorState, PassReport, TrackerDeps, TrackingCoordinator};
pub use error::TrackingError;
pub use keys::StateKeys;
pub use merger::{MergeReport, Merger};
pub use offset::OffsetTracker;
pub use scheduler::CleanupScheduler;
pub use watermark::{compute_watermark, Watermark, WatermarkCalculator};
