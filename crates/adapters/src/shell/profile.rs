// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell execution profiles: plain invocation vs sourced startup file

use std::path::PathBuf;
use tickr_core::{expand_home, CommandLine};
use tokio::process::Command;

/// How sourced-profile commands reach the user's aliases and functions.
///
/// Sourced commands run as `<shell> -c "source <rc> >/dev/null 2>&1; <cmd>"`,
/// a single non-interactive invocation, so functions defined in the startup
/// file resolve without an interactive shell attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellProfile {
    pub shell: String,
    pub rc: PathBuf,
}

impl ShellProfile {
    pub fn new(shell: impl Into<String>, rc: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
            rc: rc.into(),
        }
    }

    /// The composite script handed to `<shell> -c`
    pub fn composite(&self, line: &CommandLine) -> String {
        let rc = expand_home(&self.rc);
        format!(
            "source {} >/dev/null 2>&1; {}",
            quote(&rc.to_string_lossy()),
            render(line)
        )
    }

    /// Build the process for `line`.
    ///
    /// Plain argv commands are spawned directly; plain shell strings go
    /// through `sh -c`.
    pub(crate) fn command(&self, line: &CommandLine, sourced: bool) -> Option<Command> {
        if sourced {
            let mut cmd = Command::new(&self.shell);
            cmd.arg("-c").arg(self.composite(line));
            return Some(cmd);
        }
        match line {
            CommandLine::Shell(script) => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(script);
                Some(cmd)
            }
            CommandLine::Argv(argv) => {
                let (program, args) = argv.split_first()?;
                let mut cmd = Command::new(program);
                cmd.args(args);
                Some(cmd)
            }
        }
    }
}

impl Default for ShellProfile {
    fn default() -> Self {
        Self::new("zsh", "~/.zshrc")
    }
}

/// Render a command line as shell source
fn render(line: &CommandLine) -> String {
    match line {
        CommandLine::Shell(script) => script.clone(),
        CommandLine::Argv(argv) => argv
            .iter()
            .map(|a| quote(a))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Quote one word for POSIX shells, leaving safe words untouched
pub fn quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@%+,".contains(c));
    if safe {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
