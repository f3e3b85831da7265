// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod check;
pub mod daemon;
pub mod task;
pub mod tick;

use crate::error::TickrError;
use std::path::Path;
use std::process::ExitCode;
use tickr_adapters::{ProcessRunner, ShellProfile, TracedCommandRunner};
use tickr_catalog::{load_catalog, Catalog};
use tickr_engine::{DispatchOutcome, Dispatcher, Registry};

pub type Runner = TracedCommandRunner<ProcessRunner>;

pub fn load(path: &Path) -> Result<Catalog, TickrError> {
    load_catalog(path).map_err(|e| TickrError::catalog(path, e))
}

/// Dispatcher over the real process runner, configured from catalog settings
pub fn dispatcher(catalog: Catalog, dry_run: bool) -> Dispatcher<Runner> {
    let profile = ShellProfile::new(&catalog.settings.shell, &catalog.settings.rc);
    let runner = TracedCommandRunner::new(ProcessRunner::new(profile));
    Dispatcher::new(catalog, Registry::builtin(), runner, dry_run)
}

/// Non-zero when any entry errored or any dispatched task failed
pub fn exit_code(outcomes: &[DispatchOutcome]) -> ExitCode {
    if outcomes.iter().any(DispatchOutcome::is_failure) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
