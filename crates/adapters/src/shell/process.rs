// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Real command runner backed by child processes

use super::{CommandError, CommandRunner, RunOutput, ShellProfile};
use async_trait::async_trait;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use std::process::Stdio;
use std::time::Instant;
use tickr_core::{CommandOutcome, CommandSpec};

/// Spawns each command as a child process.
///
/// Standard input is always `/dev/null` so a child can never take over a
/// terminal. Each child leads its own process group; at the deadline the
/// whole group is killed, including anything the shell started.
#[derive(Clone, Debug, Default)]
pub struct ProcessRunner {
    profile: ShellProfile,
}

impl ProcessRunner {
    pub fn new(profile: ShellProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ShellProfile {
        &self.profile
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<RunOutput, CommandError> {
        if spec.line.is_empty() {
            return Err(CommandError::Empty);
        }
        if spec.dry_run {
            return Ok(RunOutput::Suppressed);
        }

        let command = spec.line.to_string();
        let mut cmd = self
            .profile
            .command(&spec.line, spec.sourced)
            .ok_or(CommandError::Empty)?;
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .kill_on_drop(true);

        let start = Instant::now();
        let child = cmd.spawn().map_err(|source| CommandError::Spawn {
            command: command.clone(),
            source,
        })?;
        let pid = child.id();

        let output = match tokio::time::timeout(spec.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| CommandError::Spawn {
                command: command.clone(),
                source,
            })?,
            Err(_) => {
                if let Some(pid) = pid {
                    kill_group(pid);
                }
                return Err(CommandError::Timeout {
                    command,
                    timeout: spec.timeout,
                });
            }
        };

        let outcome = CommandOutcome {
            command,
            // Killed by a signal: no exit code
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration: start.elapsed(),
        };

        if spec.fail_fast && !outcome.success() {
            return Err(CommandError::failed(outcome));
        }
        Ok(RunOutput::Completed(outcome))
    }
}

fn kill_group(pid: u32) {
    let Ok(raw) = i32::try_from(pid) else {
        return;
    };
    if let Err(error) = killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        tracing::debug!(pid, %error, "process group already gone");
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
