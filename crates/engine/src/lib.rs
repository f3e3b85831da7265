// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tickr execution engine: predicates, tasks and the dispatcher

mod context;
pub mod discovery;
mod dispatcher;
mod error;
pub mod predicate;
mod registry;
pub mod task;

pub use context::{ExecutionContext, StepRecord, StepResult};
pub use dispatcher::{DispatchOutcome, Dispatcher, MANUAL_ENTRY};
pub use error::{DispatchError, LoadError, StepError};
pub use predicate::Predicate;
pub use registry::{LoadContext, PredicateFactory, Registry, TaskFactory};
pub use task::TaskModule;
