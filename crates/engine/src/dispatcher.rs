// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatcher: on each tick, evaluate due entries and invoke selected tasks

use crate::error::DispatchError;
use crate::registry::{LoadContext, Registry};
use chrono::{DateTime, Utc};
use tickr_adapters::CommandRunner;
use tickr_catalog::{Catalog, ScheduleEntry};
use tickr_core::TaskId;
use tracing::Instrument;

/// Entry name recorded for tasks run on demand rather than by schedule
pub const MANUAL_ENTRY: &str = "manual";

/// Result of handling one schedule entry (or of a tick with nothing due)
#[derive(Debug)]
pub enum DispatchOutcome {
    NoScheduleDue,
    NoTaskSelected {
        entry: String,
    },
    TaskDispatched {
        entry: String,
        task_id: TaskId,
        success: bool,
    },
    DispatchError {
        entry: String,
        reason: DispatchError,
    },
}

impl DispatchOutcome {
    pub fn entry(&self) -> Option<&str> {
        match self {
            DispatchOutcome::NoScheduleDue => None,
            DispatchOutcome::NoTaskSelected { entry }
            | DispatchOutcome::TaskDispatched { entry, .. }
            | DispatchOutcome::DispatchError { entry, .. } => Some(entry),
        }
    }

    /// A dispatch error or a task that reported failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            DispatchOutcome::DispatchError { .. }
                | DispatchOutcome::TaskDispatched { success: false, .. }
        )
    }
}

/// Owns the catalog, registry and command runner for the process lifetime.
///
/// Modules are loaded fresh from the registry for every evaluation, so a
/// reloaded catalog takes effect on the next tick. Entries are handled
/// strictly one after another.
pub struct Dispatcher<R> {
    catalog: Catalog,
    registry: Registry,
    runner: R,
    dry_run: bool,
    span: tracing::Span,
}

impl<R: CommandRunner> Dispatcher<R> {
    pub fn new(catalog: Catalog, registry: Registry, runner: R, dry_run: bool) -> Self {
        let span = tracing::info_span!("dispatcher", dry_run);
        Self {
            catalog,
            registry,
            runner,
            dry_run,
            span,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Replace the catalog; takes effect for the next tick
    pub fn reload(&mut self, catalog: Catalog) {
        let _enter = self.span.enter();
        tracing::info!(
            entries = catalog.schedule.len(),
            tasks = catalog.tasks.len(),
            "catalog reloaded"
        );
        self.catalog = catalog;
    }

    /// Handle every entry due at `now`, in catalog order
    pub async fn tick(&self, now: DateTime<Utc>) -> Vec<DispatchOutcome> {
        let due: Vec<&ScheduleEntry> = self.catalog.due(now).collect();
        if due.is_empty() {
            self.span.in_scope(|| tracing::debug!(%now, "no schedule due"));
            return vec![DispatchOutcome::NoScheduleDue];
        }

        self.span
            .in_scope(|| tracing::info!(%now, due = due.len(), "tick"));
        let mut outcomes = Vec::with_capacity(due.len());
        for entry in due {
            outcomes.push(self.dispatch(entry).await);
        }
        outcomes
    }

    /// Invoke a task directly, bypassing schedule and predicate
    pub async fn run_task(&self, task_id: &TaskId) -> DispatchOutcome {
        let span = tracing::info_span!(parent: &self.span, "entry", entry = MANUAL_ENTRY);
        self.invoke(MANUAL_ENTRY, task_id.clone())
            .instrument(span)
            .await
    }

    async fn dispatch(&self, entry: &ScheduleEntry) -> DispatchOutcome {
        let span = tracing::info_span!(parent: &self.span, "entry", entry = %entry.name);
        async {
            let predicate = match self.registry.load_predicate(&entry.predicate, self.load_context()) {
                Ok(predicate) => predicate,
                Err(source) => {
                    tracing::error!(kind = %entry.predicate.kind, error = %source, "predicate could not be loaded");
                    return DispatchOutcome::DispatchError {
                        entry: entry.name.clone(),
                        reason: DispatchError::PredicateLoad(source),
                    };
                }
            };

            let predicate_span = tracing::info_span!("predicate", kind = %entry.predicate.kind);
            let Some(task_id) = predicate.decide(&self.runner).instrument(predicate_span).await
            else {
                tracing::info!("no task selected");
                return DispatchOutcome::NoTaskSelected {
                    entry: entry.name.clone(),
                };
            };

            self.invoke(&entry.name, task_id).await
        }
        .instrument(span)
        .await
    }

    async fn invoke(&self, entry: &str, task_id: TaskId) -> DispatchOutcome {
        let Some(module) = self.catalog.tasks.get(task_id.as_str()) else {
            tracing::error!(task = %task_id, "unknown task id");
            return DispatchOutcome::DispatchError {
                entry: entry.to_string(),
                reason: DispatchError::UnknownTask(task_id),
            };
        };

        let task = match self.registry.load_task(module, self.load_context()) {
            Ok(task) => task,
            Err(source) => {
                tracing::error!(task = %task_id, error = %source, "task could not be loaded");
                return DispatchOutcome::DispatchError {
                    entry: entry.to_string(),
                    reason: DispatchError::TaskLoad { task_id, source },
                };
            }
        };

        tracing::info!(task = %task_id, kind = %module.kind, dry_run = self.dry_run, "dispatching task");
        let task_span = tracing::info_span!("task", task = %task_id, kind = %module.kind);
        let success = task
            .execute(&self.runner, self.dry_run)
            .instrument(task_span)
            .await;
        if success {
            tracing::info!(task = %task_id, "task completed");
        } else {
            tracing::warn!(task = %task_id, "task reported failure");
        }

        DispatchOutcome::TaskDispatched {
            entry: entry.to_string(),
            task_id,
            success,
        }
    }

    fn load_context(&self) -> LoadContext<'_> {
        LoadContext {
            settings: &self.catalog.settings,
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
