// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tickr - cron-driven task dispatcher

mod commands;
mod error;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use commands::{check, daemon, task, tick};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "tickr",
    version,
    about = "tickr - run tasks when their schedule fires and their predicate agrees"
)]
struct Cli {
    /// Catalog of schedule entries and task definitions (TOML or JSON)
    #[arg(long, global = true, env = "TICKR_CATALOG", default_value = "tickr.toml")]
    catalog: PathBuf,

    /// Log every intended command without executing any task step
    #[arg(long, global = true)]
    dry_run: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scheduler until interrupted
    Daemon,
    /// Evaluate the schedule once
    Tick(tick::TickArgs),
    /// Validate the catalog and show upcoming fire times
    Check(check::CheckArgs),
    /// Run a task directly, bypassing schedule and predicate
    Task(task::TaskArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match logging::init(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: failed to set up logging: {e:#}");
            return ExitCode::from(2);
        }
    };

    let dry_run = cli.dry_run || tickr_core::dry_run_from_env();
    let result = match cli.command {
        Commands::Daemon => daemon::handle(&cli.catalog, dry_run).await,
        Commands::Tick(args) => tick::handle(args, &cli.catalog, dry_run).await,
        Commands::Check(args) => check::handle(args, &cli.catalog),
        Commands::Task(args) => task::handle(args, &cli.catalog, dry_run).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error::report(&e);
            ExitCode::from(2)
        }
    }
}
