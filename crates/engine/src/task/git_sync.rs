// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pull a branch, build, verify and ship the resulting artifact

use super::TaskModule;
use crate::context::ExecutionContext;
use crate::error::StepError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tickr_adapters::CommandRunner;
use tickr_core::{expand_home, CommandLine, DEFAULT_TIMEOUT};

fn default_remote() -> String {
    "origin".to_string()
}

fn git(args: &[&str]) -> CommandLine {
    CommandLine::Argv(
        std::iter::once("git")
            .chain(args.iter().copied())
            .map(String::from)
            .collect(),
    )
}

/// Fast-forwards `branch` from `remote`, then runs the optional build,
/// verify, artifact discovery and upload stages in that order.
///
/// Build, verify and upload run through the sourced shell profile so that
/// functions and aliases from the startup file resolve. The upload command
/// may reference the discovered artifact as `{artifact}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitSyncShip {
    pub repo: PathBuf,
    #[serde(default = "default_remote")]
    pub remote: String,
    pub branch: String,
    #[serde(default)]
    pub prepare: Option<CommandLine>,
    #[serde(default)]
    pub build: Option<CommandLine>,
    #[serde(default)]
    pub verify: Option<CommandLine>,
    /// Glob for the artifact, searched recursively under `repo`
    #[serde(default)]
    pub artifact: Option<String>,
    #[serde(default)]
    pub upload: Option<CommandLine>,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
    /// Bound for the build stage, which usually outlasts the default
    #[serde(default, with = "humantime_serde")]
    pub build_timeout: Option<Duration>,
}

impl GitSyncShip {
    /// Reject configurations that could never complete
    pub fn validate(&self) -> Result<(), String> {
        if self.branch.trim().is_empty() {
            return Err("branch must not be empty".to_string());
        }
        let uses_artifact = self
            .upload
            .as_ref()
            .is_some_and(|u| u.to_string().contains("{artifact}"));
        if uses_artifact && self.artifact.is_none() {
            return Err("upload references {artifact} but no artifact pattern is set".to_string());
        }
        Ok(())
    }

    async fn ship(&self, ctx: &mut ExecutionContext<'_>) -> Result<(), StepError> {
        let repo = ctx.working_dir().to_path_buf();
        ctx.require_dir(&repo)?;

        if let Some(prepare) = &self.prepare {
            ctx.run("prepare", ctx.command(prepare.clone()).sourced())
                .await?;
        }

        let dirty = ctx
            .query(
                "status",
                ctx.command(git(&["status", "--porcelain", "--untracked-files=no"])),
            )
            .await?;
        if let Some(changes) = dirty.filter(|s| !s.is_empty()) {
            return Err(StepError::Precondition(format!(
                "uncommitted changes in {}: {}",
                repo.display(),
                changes.lines().next().unwrap_or_default()
            )));
        }

        let current = ctx
            .query(
                "current-branch",
                ctx.command(git(&["rev-parse", "--abbrev-ref", "HEAD"])),
            )
            .await?;
        if current.as_deref() != Some(self.branch.as_str()) {
            ctx.run("checkout", ctx.command(git(&["checkout", self.branch.as_str()])))
                .await?;
            if let Some(previous) = current {
                ctx.set_recovery(format!(
                    "working tree in {} switched from '{previous}' to '{}'; run `git checkout {previous}` to restore",
                    repo.display(),
                    self.branch
                ));
            }
        }

        ctx.run(
            "pull",
            ctx.command(git(&["pull", "--ff-only", self.remote.as_str(), self.branch.as_str()])),
        )
        .await?;

        if let Some(build) = &self.build {
            let mut spec = ctx.command(build.clone()).sourced();
            if let Some(timeout) = self.build_timeout {
                spec = spec.timeout(timeout);
            }
            ctx.run("build", spec).await?;
        }

        if let Some(verify) = &self.verify {
            ctx.run("verify", ctx.command(verify.clone()).sourced())
                .await?;
        }

        if let Some(pattern) = &self.artifact {
            ctx.discover("artifact", &repo, pattern, "artifact")?;
        }

        if let Some(upload) = &self.upload {
            ctx.run("upload", ctx.command(upload.clone()).sourced())
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl TaskModule for GitSyncShip {
    async fn execute(&self, runner: &dyn CommandRunner, dry_run: bool) -> bool {
        let mut ctx = ExecutionContext::new(
            runner,
            expand_home(&self.repo),
            dry_run,
            self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        );
        let result = self.ship(&mut ctx).await;
        ctx.conclude(result)
    }
}

#[cfg(test)]
#[path = "git_sync_tests.rs"]
mod tests;
