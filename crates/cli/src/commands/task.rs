// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manual task invocation

use crate::error::TickrError;
use crate::output::{print_list, OutcomeReport, OutputFormat};
use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;
use tickr_core::TaskId;

#[derive(clap::Args)]
pub struct TaskArgs {
    /// Identifier from the catalog's task table
    id: String,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

pub async fn handle(args: TaskArgs, catalog: &Path, dry_run: bool) -> Result<ExitCode> {
    let catalog = super::load(catalog)?;
    if !catalog.tasks.contains(&args.id) {
        let known: Vec<&str> = catalog.tasks.iter().map(|(id, _)| id.as_str()).collect();
        return Err(TickrError::unknown_task(&args.id, &known).into());
    }

    let dispatcher = super::dispatcher(catalog, dry_run);
    let outcome = dispatcher.run_task(&TaskId::new(args.id)).await;

    let code = super::exit_code(std::slice::from_ref(&outcome));
    print_list(&[OutcomeReport::from(&outcome)], args.format);
    Ok(code)
}
