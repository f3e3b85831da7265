// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task modules: ordered, side-effecting command sequences

mod git_sync;
mod shell_steps;
mod steps;

pub use git_sync::GitSyncShip;
pub use shell_steps::ShellSteps;
pub use steps::{run_steps, CommandStep, DiscoverStep, Step};

use async_trait::async_trait;
use tickr_adapters::CommandRunner;

/// Carries out one automation procedure.
///
/// Returns true only if every fail-fast step succeeded (or was suppressed
/// under dry run). Failures are logged with the failing step, never raised.
#[async_trait]
pub trait TaskModule: Send + Sync {
    async fn execute(&self, runner: &dyn CommandRunner, dry_run: bool) -> bool;
}
