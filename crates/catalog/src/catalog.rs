// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory catalog consulted by the dispatcher

use crate::Settings;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tickr_core::{ModuleRef, Schedule, TaskId};

/// A trigger bound to one predicate module
#[derive(Debug, Clone)]
pub struct ScheduleEntry {
    pub name: String,
    pub schedule: Schedule,
    pub predicate: ModuleRef,
}

impl ScheduleEntry {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.schedule.is_due(now)
    }
}

/// Task-definition table: identifier to task module reference
#[derive(Debug, Clone, Default)]
pub struct TaskTable {
    entries: BTreeMap<TaskId, ModuleRef>,
}

impl TaskTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, returning false when the identifier is taken
    pub fn insert(&mut self, id: TaskId, module: ModuleRef) -> bool {
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id, module);
        true
    }

    pub fn get(&self, id: &str) -> Option<&ModuleRef> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TaskId, &ModuleRef)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A loaded catalog. Immutable once built; replaced wholesale on reload.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub settings: Settings,
    pub schedule: Vec<ScheduleEntry>,
    pub tasks: TaskTable,
}

impl Catalog {
    /// Entries whose trigger matches `now`, in configured order
    pub fn due(&self, now: DateTime<Utc>) -> impl Iterator<Item = &ScheduleEntry> {
        self.schedule.iter().filter(move |e| e.is_due(now))
    }

    /// Earliest fire time of any entry strictly after `after`
    pub fn next_fire_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule
            .iter()
            .filter_map(|e| e.schedule.next_after(after))
            .min()
    }

    pub fn entry(&self, name: &str) -> Option<&ScheduleEntry> {
        self.schedule.iter().find(|e| e.name == name)
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
