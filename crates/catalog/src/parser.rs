// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog parsing from TOML or JSON

use crate::{Catalog, ScheduleEntry, Settings, TaskTable};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tickr_core::{ModuleRef, Schedule, ScheduleError, TaskId};

/// Errors that can occur while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schedule entry '{entry}': {source}")]
    Schedule {
        entry: String,
        #[source]
        source: ScheduleError,
    },
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(String),
    #[error("duplicate schedule entry name: {0}")]
    DuplicateEntry(String),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

/// Source format of a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Pick the format from a file extension, defaulting to TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Toml,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    schedule: Vec<RawEntry>,
    #[serde(default, deserialize_with = "ordered_pairs")]
    tasks: Vec<(String, ModuleRef)>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    name: Option<String>,
    cron: String,
    predicate: ModuleRef,
}

/// Read and parse the catalog at `path`
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&content, Format::from_path(path))
}

/// Parse a catalog from `content`
pub fn parse_catalog(content: &str, format: Format) -> Result<Catalog, CatalogError> {
    let raw: RawCatalog = match format {
        Format::Toml => toml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
    };

    let mut tasks = TaskTable::new();
    for (id, module) in raw.tasks {
        check_kind(&module, &format!("tasks.{}", id))?;
        if !tasks.insert(TaskId::new(id.clone()), module) {
            return Err(CatalogError::DuplicateTask(id));
        }
    }

    let mut names = HashSet::new();
    let mut schedule = Vec::with_capacity(raw.schedule.len());
    for (index, entry) in raw.schedule.into_iter().enumerate() {
        let name = entry
            .name
            .unwrap_or_else(|| format!("{}#{}", entry.predicate.kind, index));
        if !names.insert(name.clone()) {
            return Err(CatalogError::DuplicateEntry(name));
        }
        check_kind(&entry.predicate, &format!("schedule '{}'", name))?;

        let trigger = Schedule::with_timezone(entry.cron, &raw.settings.timezone).map_err(
            |source| CatalogError::Schedule {
                entry: name.clone(),
                source,
            },
        )?;
        schedule.push(ScheduleEntry {
            name,
            schedule: trigger,
            predicate: entry.predicate,
        });
    }

    Ok(Catalog {
        settings: raw.settings,
        schedule,
        tasks,
    })
}

fn check_kind(module: &ModuleRef, context: &str) -> Result<(), CatalogError> {
    if module.kind.trim().is_empty() {
        return Err(CatalogError::InvalidFormat(format!(
            "{}: module kind must not be empty",
            context
        )));
    }
    Ok(())
}

/// Deserialize a map as ordered key/value pairs so repeated keys are
/// reported rather than silently overwritten.
fn ordered_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, ModuleRef)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, ModuleRef)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a table of task identifiers to module references")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, ModuleRef>()? {
                pairs.push((key, value));
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
