// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Predicate modules: decide whether a task should run now

mod always;
mod path_exists;
mod remote_ahead;

pub use always::Always;
pub use path_exists::PathExists;
pub use remote_ahead::RemoteAhead;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tickr_adapters::{CommandError, CommandRunner};
use tickr_core::TaskId;

/// Inspects external state and names the task to run, if any.
///
/// Predicates only observe: they may run read-only and fetch-only commands
/// but never mutate a working tree. Any failure is reported as `None`.
#[async_trait]
pub trait Predicate: Send + Sync {
    async fn decide(&self, runner: &dyn CommandRunner) -> Option<TaskId>;
}

/// Why a probe could not reach a verdict
#[derive(Debug, Error)]
pub(crate) enum ProbeError {
    #[error("directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("could not parse {what} from {output:?}")]
    Parse { what: &'static str, output: String },
}

/// Collapse a probe result into a decision, logging the reason for `None`
pub(crate) fn settle(
    kind: &str,
    task: &TaskId,
    probe: Result<bool, ProbeError>,
) -> Option<TaskId> {
    match probe {
        Ok(true) => {
            tracing::info!(kind, task = %task, "predicate selected task");
            Some(task.clone())
        }
        Ok(false) => {
            tracing::info!(kind, "predicate declined");
            None
        }
        Err(error) => {
            tracing::warn!(kind, error = %error, "predicate failed");
            None
        }
    }
}
