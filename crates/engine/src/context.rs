// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-invocation execution context shared by a task's steps

use crate::discovery;
use crate::error::StepError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tickr_adapters::{quote, CommandRunner, RunOutput};
use tickr_core::{CommandLine, CommandOutcome, CommandSpec};

/// What happened to one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Ran(CommandOutcome),
    Suppressed { command: String },
    Failed { command: String, error: String },
    Discovered(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: String,
    pub result: StepResult,
}

/// State for one task invocation: working directory, dry-run flag, default
/// timeout, bound variables and the log of every step taken.
///
/// The dry-run flag is fixed at construction and applied to every command
/// routed through [`ExecutionContext::run`].
pub struct ExecutionContext<'a> {
    runner: &'a dyn CommandRunner,
    working_dir: PathBuf,
    dry_run: bool,
    timeout: Duration,
    vars: BTreeMap<String, String>,
    records: Vec<StepRecord>,
    recovery: Option<String>,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        working_dir: impl Into<PathBuf>,
        dry_run: bool,
        timeout: Duration,
    ) -> Self {
        Self {
            runner,
            working_dir: working_dir.into(),
            dry_run,
            timeout,
            vars: BTreeMap::new(),
            records: Vec::new(),
            recovery: None,
        }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Outcomes of the commands that actually ran
    pub fn outcomes(&self) -> impl Iterator<Item = &CommandOutcome> {
        self.records.iter().filter_map(|r| match &r.result {
            StepResult::Ran(outcome) => Some(outcome),
            _ => None,
        })
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Bind a value substituted for `{name}` in later commands
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Remember how to undo a mutation, reported if a later step fails
    pub fn set_recovery(&mut self, hint: impl Into<String>) {
        self.recovery = Some(hint.into());
    }

    pub fn recovery(&self) -> Option<&str> {
        self.recovery.as_deref()
    }

    /// A spec rooted in the working directory with the context's timeout
    pub fn command(&self, line: impl Into<CommandLine>) -> CommandSpec {
        CommandSpec::new(line)
            .cwd(&self.working_dir)
            .timeout(self.timeout)
    }

    pub fn require_dir(&self, dir: &Path) -> Result<(), StepError> {
        if dir.is_dir() {
            Ok(())
        } else {
            Err(StepError::MissingDirectory(dir.to_path_buf()))
        }
    }

    /// Run one step's command under the context's dry-run policy.
    ///
    /// Bound variables are substituted first, shell-quoted when the command is
    /// a shell string. A non-zero exit is returned as
    /// an outcome only when the spec is not fail-fast.
    pub async fn run(
        &mut self,
        step: &str,
        mut spec: CommandSpec,
    ) -> Result<RunOutput, StepError> {
        for (name, value) in &self.vars {
            let value = match spec.line {
                CommandLine::Shell(_) => quote(value),
                CommandLine::Argv(_) => value.clone(),
            };
            spec.line = spec.line.substitute(name, &value);
        }
        spec.dry_run = self.dry_run;
        let command = spec.line.to_string();

        match self.runner.run(&spec).await {
            Ok(output) => {
                let result = match &output {
                    RunOutput::Completed(outcome) => StepResult::Ran(outcome.clone()),
                    RunOutput::Suppressed => StepResult::Suppressed { command },
                };
                self.record(step, result);
                Ok(output)
            }
            Err(source) => {
                self.record(
                    step,
                    StepResult::Failed {
                        command,
                        error: source.to_string(),
                    },
                );
                Err(StepError::Command {
                    step: step.to_string(),
                    source,
                })
            }
        }
    }

    /// Run an inspection command and return its trimmed stdout.
    ///
    /// Yields `None` under dry run, where nothing is spawned.
    pub async fn query(
        &mut self,
        step: &str,
        spec: CommandSpec,
    ) -> Result<Option<String>, StepError> {
        let output = self.run(step, spec).await?;
        Ok(output.outcome().map(|o| o.stdout_trimmed().to_string()))
    }

    /// Locate the newest artifact matching `pattern` under `root` and bind
    /// its path to `bind`.
    ///
    /// Discovery is read-only and runs under dry run too; there a miss is
    /// logged and the pattern stands in for the path.
    pub fn discover(
        &mut self,
        step: &str,
        root: &Path,
        pattern: &str,
        bind: &str,
    ) -> Result<PathBuf, StepError> {
        let path = match discovery::find_latest(root, pattern) {
            Ok(path) => path,
            Err(source) if self.dry_run => {
                tracing::warn!(step, error = %source, "dry run: artifact not found, using placeholder");
                root.join(pattern)
            }
            Err(source) => {
                self.record(
                    step,
                    StepResult::Failed {
                        command: format!("discover {pattern}"),
                        error: source.to_string(),
                    },
                );
                return Err(StepError::Discovery {
                    step: step.to_string(),
                    source,
                });
            }
        };

        tracing::info!(step, artifact = %path.display(), "artifact selected");
        self.bind(bind, path.display().to_string());
        self.record(step, StepResult::Discovered(path.clone()));
        Ok(path)
    }

    /// Log the invocation summary and convert the result to the task verdict
    pub fn conclude(self, result: Result<(), StepError>) -> bool {
        let ran = self.outcomes().count();
        let suppressed = self
            .records
            .iter()
            .filter(|r| matches!(r.result, StepResult::Suppressed { .. }))
            .count();

        match result {
            Ok(()) => {
                tracing::info!(steps = self.records.len(), ran, suppressed, "task succeeded");
                true
            }
            Err(error) => {
                match &self.recovery {
                    Some(hint) => tracing::error!(
                        steps = self.records.len(),
                        ran,
                        error = %error,
                        recovery = %hint,
                        "task failed"
                    ),
                    None => tracing::error!(
                        steps = self.records.len(),
                        ran,
                        error = %error,
                        "task failed"
                    ),
                }
                false
            }
        }
    }

    fn record(&mut self, step: &str, result: StepResult) {
        self.records.push(StepRecord {
            step: step.to_string(),
            result,
        });
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
