// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::Predicate;
use async_trait::async_trait;
use serde::Deserialize;
use tickr_adapters::CommandRunner;
use tickr_core::TaskId;

/// Selects its task on every evaluation
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Always {
    pub task: TaskId,
}

#[async_trait]
impl Predicate for Always {
    async fn decide(&self, _runner: &dyn CommandRunner) -> Option<TaskId> {
        tracing::info!(task = %self.task, "predicate selected task");
        Some(self.task.clone())
    }
}
