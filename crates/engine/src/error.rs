// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for module loading, task steps and dispatch

use crate::discovery::DiscoveryError;
use std::path::PathBuf;
use thiserror::Error;
use tickr_adapters::CommandError;
use tickr_core::{ModuleRefError, TaskId};

/// A module reference could not be turned into a runnable module
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unknown {role} kind: {kind}")]
    UnknownKind { role: &'static str, kind: String },
    #[error(transparent)]
    Params(#[from] ModuleRefError),
    #[error("invalid {kind} configuration: {message}")]
    Invalid { kind: String, message: String },
}

/// Why a task stopped before completing its sequence
#[derive(Debug, Error)]
pub enum StepError {
    #[error("precondition failed: {0}")]
    Precondition(String),
    #[error("required directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("step '{step}' failed: {source}")]
    Command {
        step: String,
        #[source]
        source: CommandError,
    },
    #[error("step '{step}': {source}")]
    Discovery {
        step: String,
        #[source]
        source: DiscoveryError,
    },
    #[error("step '{step}' produced unexpected output: {message}")]
    Unexpected { step: String, message: String },
}

/// A schedule entry could not be carried through to a task invocation
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("predicate could not be loaded: {0}")]
    PredicateLoad(#[source] LoadError),
    #[error("unknown task id: {0}")]
    UnknownTask(TaskId),
    #[error("task {task_id} could not be loaded: {source}")]
    TaskLoad {
        task_id: TaskId,
        #[source]
        source: LoadError,
    },
}
