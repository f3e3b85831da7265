// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog validation

use crate::output::{print_list, OutputFormat};
use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::process::ExitCode;
use tickr_catalog::Catalog;
use tickr_core::{Clock, SystemClock};
use tickr_engine::{LoadContext, Registry};

#[derive(clap::Args)]
pub struct CheckArgs {
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

/// Validation result for one schedule entry or task definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckLine {
    pub item: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub problems: Vec<String>,
}

impl fmt::Display for CheckLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.problems.is_empty() { "ok" } else { "FAIL" };
        write!(f, "{status:<4} {} ({})", self.item, self.kind)?;
        if let Some(next) = &self.next {
            write!(f, " next: {next}")?;
        }
        for problem in &self.problems {
            write!(f, "\n       {problem}")?;
        }
        Ok(())
    }
}

pub fn handle(args: CheckArgs, catalog: &Path) -> Result<ExitCode> {
    let catalog = super::load(catalog)?;
    let lines = check(&catalog, &Registry::builtin(), &SystemClock);

    print_list(&lines, args.format);
    if lines.iter().any(|l| !l.problems.is_empty()) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Load every module once and cross-check task references
pub fn check(catalog: &Catalog, registry: &Registry, clock: &impl Clock) -> Vec<CheckLine> {
    let ctx = LoadContext {
        settings: &catalog.settings,
    };
    let now = clock.now();
    let mut lines = Vec::new();

    for entry in &catalog.schedule {
        let mut problems = Vec::new();
        if let Err(e) = registry.load_predicate(&entry.predicate, ctx) {
            problems.push(e.to_string());
        }
        if let Some(task) = entry.predicate.params.get("task").and_then(|v| v.as_str()) {
            if !catalog.tasks.contains(task) {
                problems.push(format!("selects undefined task '{task}'"));
            }
        }
        let next = entry.schedule.next_after(now).map(|t| {
            t.with_timezone(&entry.schedule.timezone())
                .format("%Y-%m-%d %H:%M:%S %Z")
                .to_string()
        });
        if next.is_none() {
            problems.push(format!("'{}' never fires", entry.schedule.expression()));
        }
        lines.push(CheckLine {
            item: format!("schedule {}", entry.name),
            kind: entry.predicate.kind.clone(),
            next,
            problems,
        });
    }

    for (id, module) in catalog.tasks.iter() {
        let problems = match registry.load_task(module, ctx) {
            Ok(_) => Vec::new(),
            Err(e) => vec![e.to_string()],
        };
        lines.push(CheckLine {
            item: format!("task {id}"),
            kind: module.kind.clone(),
            next: None,
            problems,
        });
    }

    lines
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
