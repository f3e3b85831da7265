// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command runner: executes one external command per call

mod process;
mod profile;

pub use process::ProcessRunner;
pub use profile::{quote, ShellProfile};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{CommandCall, FakeCommandRunner, FakeResponse};

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tickr_core::{CommandOutcome, CommandSpec};

/// Errors from running a command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("working directory does not exist: {}", .0.display())]
    MissingCwd(PathBuf),
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with code {exit_code}")]
    Failed {
        command: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
    #[error("`{command}` timed out after {}s", .timeout.as_secs_f64())]
    Timeout { command: String, timeout: Duration },
}

impl CommandError {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandError::Failed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, CommandError::Timeout { .. })
    }

    pub(crate) fn failed(outcome: CommandOutcome) -> Self {
        CommandError::Failed {
            command: outcome.command,
            exit_code: outcome.exit_code,
            stdout: outcome.stdout,
            stderr: outcome.stderr,
        }
    }
}

/// What a runner returns for a command that did not error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutput {
    /// The command ran; a non-zero exit is only possible without fail-fast
    Completed(CommandOutcome),
    /// Dry run: nothing was spawned
    Suppressed,
}

impl RunOutput {
    /// The outcome, if the command actually ran
    pub fn outcome(&self) -> Option<&CommandOutcome> {
        match self {
            RunOutput::Completed(outcome) => Some(outcome),
            RunOutput::Suppressed => None,
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, RunOutput::Suppressed)
    }

    /// Control-flow success: a suppressed command counts as success
    pub fn succeeded(&self) -> bool {
        match self {
            RunOutput::Completed(outcome) => outcome.success(),
            RunOutput::Suppressed => true,
        }
    }
}

/// Runs external commands.
///
/// Implementations must honor every field of [`CommandSpec`]: never spawn
/// when `dry_run` is set, bound execution by `timeout`, and turn a non-zero
/// exit into [`CommandError::Failed`] when `fail_fast` is set.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> Result<RunOutput, CommandError>;
}

#[async_trait]
impl<R: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<R> {
    async fn run(&self, spec: &CommandSpec) -> Result<RunOutput, CommandError> {
        (**self).run(spec).await
    }
}
