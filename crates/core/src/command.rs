// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External command descriptions and their recorded outcomes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default per-command bound when neither the caller nor the catalog sets one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The command to run: a shell string or an argument vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandLine {
    Shell(String),
    Argv(Vec<String>),
}

impl CommandLine {
    pub fn is_empty(&self) -> bool {
        match self {
            CommandLine::Shell(s) => s.trim().is_empty(),
            CommandLine::Argv(argv) => argv.is_empty(),
        }
    }

    /// Replace `{name}` placeholders with `value` in every part of the command
    pub fn substitute(&self, name: &str, value: &str) -> CommandLine {
        let placeholder = format!("{{{}}}", name);
        match self {
            CommandLine::Shell(s) => CommandLine::Shell(s.replace(&placeholder, value)),
            CommandLine::Argv(argv) => CommandLine::Argv(
                argv.iter()
                    .map(|a| a.replace(&placeholder, value))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandLine::Shell(s) => write!(f, "{}", s),
            CommandLine::Argv(argv) => write!(f, "{}", argv.join(" ")),
        }
    }
}

impl From<&str> for CommandLine {
    fn from(s: &str) -> Self {
        CommandLine::Shell(s.to_string())
    }
}

impl From<String> for CommandLine {
    fn from(s: String) -> Self {
        CommandLine::Shell(s)
    }
}

/// Everything the command runner needs to execute one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub line: CommandLine,
    pub cwd: Option<PathBuf>,
    /// Run after sourcing the user's shell startup file
    pub sourced: bool,
    pub timeout: Duration,
    pub dry_run: bool,
    /// Treat a non-zero exit as an error rather than an outcome
    pub fail_fast: bool,
}

impl CommandSpec {
    pub fn new(line: impl Into<CommandLine>) -> Self {
        Self {
            line: line.into(),
            cwd: None,
            sourced: false,
            timeout: DEFAULT_TIMEOUT,
            dry_run: false,
            fail_fast: true,
        }
    }

    pub fn shell(command: impl Into<String>) -> Self {
        Self::new(CommandLine::Shell(command.into()))
    }

    pub fn argv<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(CommandLine::Argv(args.into_iter().map(Into::into).collect()))
    }

    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    pub fn sourced(mut self) -> Self {
        self.sourced = true;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.line)
    }
}

/// Result of one external command that actually ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub command: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Trimmed stdout, the common case for single-value git queries
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
