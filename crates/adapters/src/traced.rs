// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced runner wrapper for consistent observability

use crate::shell::{CommandError, CommandRunner, RunOutput};
use async_trait::async_trait;
use tickr_core::CommandSpec;
use tracing::Instrument;

/// Wrapper that adds tracing to any CommandRunner.
///
/// Logs the command and working directory for every call, captured output at
/// debug level, and failures with their exit code and stderr.
#[derive(Clone)]
pub struct TracedCommandRunner<R> {
    inner: R,
}

impl<R> TracedCommandRunner<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: CommandRunner> CommandRunner for TracedCommandRunner<R> {
    async fn run(&self, spec: &CommandSpec) -> Result<RunOutput, CommandError> {
        let cwd = spec
            .cwd
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        let span = tracing::info_span!(
            "command",
            command = %spec.line,
            cwd = %cwd,
            sourced = spec.sourced
        );

        async move {
            if spec.dry_run {
                tracing::info!("dry run: command suppressed");
                return self.inner.run(spec).await;
            }

            // Precondition: cwd must exist
            if let Some(dir) = &spec.cwd {
                if !dir.is_dir() {
                    tracing::error!("working directory does not exist");
                    return Err(CommandError::MissingCwd(dir.clone()));
                }
            }

            tracing::info!(
                timeout_ms = spec.timeout.as_millis() as u64,
                fail_fast = spec.fail_fast,
                "running"
            );
            let result = self.inner.run(spec).await;

            match &result {
                Ok(RunOutput::Completed(outcome)) => {
                    let elapsed_ms = outcome.duration.as_millis() as u64;
                    if outcome.success() {
                        tracing::info!(exit_code = outcome.exit_code, elapsed_ms, "completed");
                    } else {
                        tracing::warn!(
                            exit_code = outcome.exit_code,
                            elapsed_ms,
                            stderr = %outcome.stderr.trim(),
                            "exited non-zero"
                        );
                    }
                    tracing::debug!(
                        stdout = %outcome.stdout.trim(),
                        stderr = %outcome.stderr.trim(),
                        "captured output"
                    );
                }
                Ok(RunOutput::Suppressed) => tracing::info!("suppressed"),
                Err(CommandError::Failed {
                    exit_code,
                    stdout,
                    stderr,
                    ..
                }) => {
                    tracing::error!(exit_code, stderr = %stderr.trim(), "failed");
                    tracing::debug!(stdout = %stdout.trim(), "captured output");
                }
                Err(e) => tracing::error!(error = %e, "failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
