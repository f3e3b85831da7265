//! Shared helpers for CLI specs

#![allow(dead_code)]

pub use std::path::Path;

use assert_cmd::Command;
use std::process::Output;
use tempfile::TempDir;

/// A schedule that fires at the top of every hour, selecting `example`
/// whose single step writes `marker.txt` in the working directory.
pub const HOURLY_CATALOG: &str = r#"
[[schedule]]
name = "hourly"
cron = "0 * * * *"
predicate = { kind = "always", task = "example" }

[tasks.example]
kind = "shell-steps"
steps = [{ name = "mark", run = "echo ran > marker.txt" }]
"#;

/// Top of the hour on a weekday
pub const ON_THE_HOUR: &str = "2026-03-04T10:00:00Z";
pub const OFF_THE_HOUR: &str = "2026-03-04T10:17:00Z";

/// Temporary project directory holding a catalog
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Project whose `tickr.toml` holds `catalog`
    pub fn with_catalog(catalog: &str) -> Self {
        let project = Self::empty();
        project.file("tickr.toml", catalog);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.dir.path().join(rel).exists()
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(rel)).unwrap()
    }

    /// The tickr binary, run inside the project with a clean environment
    pub fn tickr(&self) -> Cli {
        let mut cmd = Command::cargo_bin("tickr").unwrap();
        cmd.current_dir(self.path())
            .env_remove("TICKR_DRY_RUN")
            .env_remove("DRY_RUN")
            .env_remove("TICKR_CATALOG")
            .env("RUST_LOG", "info");
        Cli { cmd }
    }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit status 0
    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstdout:\n{}\nstderr:\n{}",
            run.output.status.code(),
            run.stdout(),
            run.stderr()
        );
        run
    }

    /// Run and require a non-zero exit status
    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).to_string()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).to_string()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout missing {expected:?}:\n{stdout}"
        );
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr missing {expected:?}:\n{stderr}"
        );
        self
    }
}
