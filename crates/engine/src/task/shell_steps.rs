// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::steps::{run_steps, Step};
use super::TaskModule;
use crate::context::ExecutionContext;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tickr_adapters::CommandRunner;
use tickr_core::{expand_home, DEFAULT_TIMEOUT};

/// A generic task: required directories, then a list of steps
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShellSteps {
    #[serde(default)]
    pub cwd: Option<PathBuf>,
    /// Directories that must exist before any step runs
    #[serde(default)]
    pub require: Vec<PathBuf>,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
    pub steps: Vec<Step>,
}

#[async_trait]
impl TaskModule for ShellSteps {
    async fn execute(&self, runner: &dyn CommandRunner, dry_run: bool) -> bool {
        let cwd = self
            .cwd
            .as_ref()
            .map(expand_home)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut ctx = ExecutionContext::new(
            runner,
            cwd,
            dry_run,
            self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        );

        let mut result = Ok(());
        for dir in &self.require {
            result = ctx.require_dir(&expand_home(dir));
            if result.is_err() {
                break;
            }
        }
        if result.is_ok() {
            result = run_steps(&mut ctx, &self.steps).await;
        }
        ctx.conclude(result)
    }
}

#[cfg(test)]
#[path = "shell_steps_tests.rs"]
mod tests;
