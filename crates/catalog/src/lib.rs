// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Catalog loading: schedule entries, the task-definition table and settings

mod catalog;
mod parser;
mod settings;

pub use catalog::{Catalog, ScheduleEntry, TaskTable};
pub use parser::{load_catalog, parse_catalog, CatalogError, Format};
pub use settings::Settings;
