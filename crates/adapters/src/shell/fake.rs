// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake command runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CommandError, CommandRunner, RunOutput};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tickr_core::{CommandOutcome, CommandSpec};

/// Recorded runner call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCall {
    pub command: String,
    pub cwd: Option<PathBuf>,
    pub sourced: bool,
    pub dry_run: bool,
    pub fail_fast: bool,
    pub timeout: Duration,
}

/// Scripted reaction to a command
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    Timeout,
    SpawnFailure,
}

impl FakeResponse {
    pub fn ok(stdout: impl Into<String>) -> Self {
        FakeResponse::Exit {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn exit(code: i32, stderr: impl Into<String>) -> Self {
        FakeResponse::Exit {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Fake runner: answers by command substring and records every call.
///
/// Later registrations take priority over earlier ones; unmatched commands
/// succeed with empty output.
#[derive(Clone, Default)]
pub struct FakeCommandRunner {
    responses: Arc<Mutex<Vec<(String, FakeResponse)>>>,
    calls: Arc<Mutex<Vec<CommandCall>>>,
}

impl FakeCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the response for commands containing `pattern`
    pub fn respond(&self, pattern: impl Into<String>, response: FakeResponse) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((pattern.into(), response));
        self
    }

    /// All recorded calls, including suppressed ones
    pub fn calls(&self) -> Vec<CommandCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Commands that would have spawned a process
    pub fn executed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.dry_run)
            .map(|c| c.command)
            .collect()
    }

    /// Every command string seen, in order
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }

    fn response_for(&self, command: &str) -> Option<FakeResponse> {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .rev()
            .find(|(pattern, _)| command.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
    }
}

#[async_trait]
impl CommandRunner for FakeCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<RunOutput, CommandError> {
        let command = spec.line.to_string();
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(CommandCall {
                command: command.clone(),
                cwd: spec.cwd.clone(),
                sourced: spec.sourced,
                dry_run: spec.dry_run,
                fail_fast: spec.fail_fast,
                timeout: spec.timeout,
            });

        if spec.line.is_empty() {
            return Err(CommandError::Empty);
        }
        if spec.dry_run {
            return Ok(RunOutput::Suppressed);
        }

        let (code, stdout, stderr) = match self.response_for(&command) {
            None => (0, String::new(), String::new()),
            Some(FakeResponse::Exit {
                code,
                stdout,
                stderr,
            }) => (code, stdout, stderr),
            Some(FakeResponse::Timeout) => {
                return Err(CommandError::Timeout {
                    command,
                    timeout: spec.timeout,
                });
            }
            Some(FakeResponse::SpawnFailure) => {
                return Err(CommandError::Spawn {
                    command,
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                });
            }
        };

        let outcome = CommandOutcome {
            command,
            exit_code: code,
            stdout,
            stderr,
            duration: Duration::ZERO,
        };
        if spec.fail_fast && !outcome.success() {
            return Err(CommandError::failed(outcome));
        }
        Ok(RunOutput::Completed(outcome))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
