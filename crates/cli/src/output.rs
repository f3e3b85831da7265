// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use tickr_engine::DispatchOutcome;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a list of items
pub fn print_list<T: Serialize + fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// One dispatch outcome, flattened for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeReport {
    pub entry: Option<String>,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&DispatchOutcome> for OutcomeReport {
    fn from(outcome: &DispatchOutcome) -> Self {
        let entry = outcome.entry().map(String::from);
        let base = OutcomeReport {
            entry,
            outcome: "",
            task: None,
            success: None,
            error: None,
        };
        match outcome {
            DispatchOutcome::NoScheduleDue => OutcomeReport {
                outcome: "no-schedule-due",
                ..base
            },
            DispatchOutcome::NoTaskSelected { .. } => OutcomeReport {
                outcome: "no-task-selected",
                ..base
            },
            DispatchOutcome::TaskDispatched {
                task_id, success, ..
            } => OutcomeReport {
                outcome: "task-dispatched",
                task: Some(task_id.to_string()),
                success: Some(*success),
                ..base
            },
            DispatchOutcome::DispatchError { reason, .. } => OutcomeReport {
                outcome: "dispatch-error",
                error: Some(reason.to_string()),
                ..base
            },
        }
    }
}

impl fmt::Display for OutcomeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(entry) = &self.entry else {
            return write!(f, "no schedule due");
        };
        match (self.outcome, &self.task, self.success, &self.error) {
            (_, Some(task), Some(true), _) => write!(f, "{entry}: {task} succeeded"),
            (_, Some(task), Some(false), _) => write!(f, "{entry}: {task} failed"),
            (_, _, _, Some(error)) => write!(f, "{entry}: error: {error}"),
            _ => write!(f, "{entry}: no task selected"),
        }
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
