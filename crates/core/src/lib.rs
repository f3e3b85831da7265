// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tickr-core: shared vocabulary for the tickr dispatcher
//!
//! This crate provides:
//! - Identifiers for tasks and module references
//! - Cron schedules evaluated against a wall clock
//! - Command specifications and recorded outcomes
//! - Dry-run toggle parsing and home-relative path expansion

pub mod clock;
pub mod command;
pub mod dry_run;
pub mod id;
pub mod module;
pub mod path;
pub mod schedule;

pub use clock::{Clock, FakeClock, SystemClock};
pub use command::{CommandLine, CommandOutcome, CommandSpec, DEFAULT_TIMEOUT};
pub use dry_run::{dry_run_from_env, dry_run_from_lookup, is_truthy, DRY_RUN_VARS};
pub use id::TaskId;
pub use module::{ModuleRef, ModuleRefError};
pub use path::expand_home;
pub use schedule::{Schedule, ScheduleError};
