// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot schedule evaluation, suited to an external cron

use crate::output::{print_list, OutcomeReport, OutputFormat};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::process::ExitCode;
use tickr_core::{Clock, SystemClock};

#[derive(clap::Args)]
pub struct TickArgs {
    /// Evaluate as if the current time were this RFC 3339 timestamp
    #[arg(long, value_parser = parse_instant)]
    at: Option<DateTime<Utc>>,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

pub async fn handle(args: TickArgs, catalog: &Path, dry_run: bool) -> Result<ExitCode> {
    let now = args.at.unwrap_or_else(|| SystemClock.now());
    let dispatcher = super::dispatcher(super::load(catalog)?, dry_run);

    let outcomes = dispatcher.tick(now).await;

    let reports: Vec<OutcomeReport> = outcomes.iter().map(OutcomeReport::from).collect();
    print_list(&reports, args.format);
    Ok(super::exit_code(&outcomes))
}

pub(crate) fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp like 2026-03-04T10:20:00Z: {e}"))
}

#[cfg(test)]
#[path = "tick_tests.rs"]
mod tests;
