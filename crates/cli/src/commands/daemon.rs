// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Long-running scheduler loop

use super::Runner;
use crate::error::TickrError;
use crate::output::OutcomeReport;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tickr_catalog::Catalog;
use tickr_core::{Clock, SystemClock};
use tickr_engine::Dispatcher;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};

pub async fn handle(catalog_path: &Path, dry_run: bool) -> Result<ExitCode> {
    let clock = SystemClock;
    let mut dispatcher = super::dispatcher(super::load(catalog_path)?, dry_run);

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!(
        catalog = %catalog_path.display(),
        entries = dispatcher.catalog().schedule.len(),
        dry_run,
        "daemon started"
    );

    // Never fire the same slot twice, even if the wall clock steps back
    let mut last_fired: Option<DateTime<Utc>> = None;
    loop {
        let now = clock.now();
        if let Some(missed) = missed_slot(dispatcher.catalog(), last_fired, now) {
            warn!(%missed, %now, "previous tick overran, skipping missed fire times");
        }
        let from = last_fired.map_or(now, |last| last.max(now));
        let Some(next) = dispatcher.catalog().next_fire_after(from) else {
            return Err(TickrError::empty_schedule(catalog_path).into());
        };
        info!(next = %next, "waiting for next fire time");

        tokio::select! {
            _ = tokio::time::sleep(until(next, now)) => {}
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                break;
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                break;
            }
        }

        last_fired = Some(next);
        refresh(&mut dispatcher, catalog_path);
        for outcome in dispatcher.tick(next).await {
            let report = OutcomeReport::from(&outcome);
            if outcome.is_failure() {
                error!(%report, "dispatch failed");
            } else {
                info!(%report, "dispatched");
            }
        }
    }

    info!("daemon stopped");
    Ok(ExitCode::SUCCESS)
}

/// Time to sleep from `now` until `next`; zero if already past
pub(crate) fn until(next: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (next - now).to_std().unwrap_or(Duration::ZERO)
}

/// Earliest fire time after the last fired slot that `now` has already passed
pub(crate) fn missed_slot(
    catalog: &Catalog,
    last_fired: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    catalog
        .next_fire_after(last_fired?)
        .filter(|slot| *slot <= now)
}

/// Pick up catalog edits before each tick, keeping the last good catalog
/// when the file no longer loads.
fn refresh(dispatcher: &mut Dispatcher<Runner>, path: &Path) {
    match super::load(path) {
        Ok(catalog) => {
            if shell_changed(dispatcher.catalog(), &catalog) {
                warn!("shell or rc setting changed; takes effect after restart");
            }
            dispatcher.reload(catalog);
        }
        Err(e) => warn!(error = %e.message, "catalog reload failed, keeping previous catalog"),
    }
}

pub(crate) fn shell_changed(old: &Catalog, new: &Catalog) -> bool {
    old.settings.shell != new.settings.shell || old.settings.rc != new.settings.rc
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;
