// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{settle, Predicate, ProbeError};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tickr_adapters::CommandRunner;
use tickr_core::{expand_home, CommandLine, CommandSpec, TaskId, DEFAULT_TIMEOUT};

fn default_remote() -> String {
    "origin".to_string()
}

/// Selects its task when the remote branch has commits the local branch lacks.
///
/// Runs an optional sourced `prepare` command, fetches the branch, then counts
/// `<branch>..<remote>/<branch>`. Nothing here touches the working tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteAhead {
    pub repo: PathBuf,
    #[serde(default = "default_remote")]
    pub remote: String,
    pub branch: String,
    pub task: TaskId,
    /// Environment setup run through the sourced shell profile before fetching
    #[serde(default)]
    pub prepare: Option<CommandLine>,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl RemoteAhead {
    async fn behind(&self, runner: &dyn CommandRunner) -> Result<bool, ProbeError> {
        let repo = expand_home(&self.repo);
        if !repo.is_dir() {
            return Err(ProbeError::MissingDirectory(repo));
        }
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let spec = |line: CommandLine| CommandSpec::new(line).cwd(&repo).timeout(timeout);

        if let Some(prepare) = &self.prepare {
            runner.run(&spec(prepare.clone()).sourced()).await?;
        }

        runner
            .run(&spec(CommandLine::Argv(vec![
                "git".into(),
                "fetch".into(),
                self.remote.clone(),
                self.branch.clone(),
            ])))
            .await?;

        let range = format!("{b}..{r}/{b}", b = self.branch, r = self.remote);
        let output = runner
            .run(&spec(CommandLine::Argv(vec![
                "git".into(),
                "rev-list".into(),
                "--count".into(),
                range,
            ])))
            .await?;

        let stdout = output
            .outcome()
            .map(|o| o.stdout_trimmed().to_string())
            .unwrap_or_default();
        let count: u64 = stdout.parse().map_err(|_| ProbeError::Parse {
            what: "commit count",
            output: stdout.clone(),
        })?;
        tracing::info!(
            repo = %repo.display(),
            branch = %self.branch,
            count,
            "remote commits not yet merged"
        );
        Ok(count > 0)
    }
}

#[async_trait]
impl Predicate for RemoteAhead {
    async fn decide(&self, runner: &dyn CommandRunner) -> Option<TaskId> {
        settle("remote-ahead", &self.task, self.behind(runner).await)
    }
}

#[cfg(test)]
#[path = "remote_ahead_tests.rs"]
mod tests;
