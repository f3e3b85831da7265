// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configurable step sequences

use crate::context::ExecutionContext;
use crate::error::StepError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tickr_core::{expand_home, CommandLine};
use tracing::Instrument;

fn default_true() -> bool {
    true
}

fn default_artifact() -> String {
    "artifact".to_string()
}

/// Run one command
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandStep {
    pub name: String,
    pub run: CommandLine,
    /// Run through the sourced shell profile
    #[serde(default)]
    pub sourced: bool,
    /// Abort the sequence when this step fails
    #[serde(default = "default_true")]
    pub fail_fast: bool,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
    /// Relative to the task's working directory
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

/// Find the newest artifact matching a glob and bind its path
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoverStep {
    #[serde(default = "default_artifact")]
    pub name: String,
    pub discover: String,
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Placeholder name later steps use, as in `{artifact}`
    #[serde(default = "default_artifact")]
    pub bind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Command(CommandStep),
    Discover(DiscoverStep),
}

impl Step {
    pub fn name(&self) -> &str {
        match self {
            Step::Command(step) => &step.name,
            Step::Discover(step) => &step.name,
        }
    }
}

/// Run steps strictly in order, stopping at the first fail-fast failure.
///
/// Failures of steps with `fail_fast = false` are logged and the sequence
/// continues.
pub async fn run_steps(ctx: &mut ExecutionContext<'_>, steps: &[Step]) -> Result<(), StepError> {
    for (index, step) in steps.iter().enumerate() {
        let span = tracing::info_span!("step", index, name = %step.name());
        run_step(ctx, step).instrument(span).await?;
    }
    Ok(())
}

async fn run_step(ctx: &mut ExecutionContext<'_>, step: &Step) -> Result<(), StepError> {
    match step {
        Step::Command(step) => {
            let mut spec = ctx.command(step.run.clone()).fail_fast(step.fail_fast);
            if step.sourced {
                spec = spec.sourced();
            }
            if let Some(timeout) = step.timeout {
                spec = spec.timeout(timeout);
            }
            if let Some(cwd) = &step.cwd {
                spec = spec.cwd(resolve(ctx.working_dir(), cwd));
            }

            match ctx.run(&step.name, spec).await {
                Ok(output) => {
                    if !output.succeeded() {
                        let exit_code = output.outcome().map(|o| o.exit_code);
                        tracing::warn!(?exit_code, "non-fatal step exited non-zero, continuing");
                    }
                    Ok(())
                }
                Err(error) if !step.fail_fast => {
                    tracing::warn!(error = %error, "non-fatal step failed, continuing");
                    Ok(())
                }
                Err(error) => Err(error),
            }
        }
        Step::Discover(step) => {
            let root = match &step.root {
                Some(root) => resolve(ctx.working_dir(), root),
                None => ctx.working_dir().to_path_buf(),
            };
            ctx.discover(&step.name, &root, &step.discover, &step.bind)?;
            Ok(())
        }
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    let path = expand_home(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
#[path = "steps_tests.rs"]
mod tests;
