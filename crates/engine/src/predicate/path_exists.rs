// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{settle, Predicate};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tickr_adapters::CommandRunner;
use tickr_core::{expand_home, TaskId};

/// Selects its task when a path exists (or, with `absent`, when it doesn't)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathExists {
    pub path: PathBuf,
    pub task: TaskId,
    #[serde(default)]
    pub absent: bool,
}

#[async_trait]
impl Predicate for PathExists {
    async fn decide(&self, _runner: &dyn CommandRunner) -> Option<TaskId> {
        let exists = expand_home(&self.path).exists();
        tracing::debug!(path = %self.path.display(), exists, "checked path");
        settle("path-exists", &self.task, Ok(exists != self.absent))
    }
}
