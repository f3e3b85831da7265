// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Errors shown to the user carry what went wrong, why it might have
//! happened, and how to fix it.

use std::fmt;
use std::path::Path;
use tickr_catalog::CatalogError;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct TickrError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TickrError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The catalog file could not be read or parsed
    pub fn catalog(path: &Path, error: CatalogError) -> Self {
        let err = TickrError::new(format!("Failed to load catalog {}", path.display()))
            .with_context(error.to_string());
        let err = match &error {
            CatalogError::Io { .. } => err
                .with_suggestion("Pass the catalog location with --catalog <path>")
                .with_suggestion("Or set TICKR_CATALOG"),
            CatalogError::Schedule { .. } => err.with_suggestion(
                "Use five fields (min hour dom month dow), six with seconds, or @hourly/@daily/...",
            ),
            CatalogError::DuplicateTask(_) | CatalogError::DuplicateEntry(_) => {
                err.with_suggestion("Rename one of the duplicates; identifiers must be unique")
            }
            _ => err.with_suggestion(format!(
                "Check the catalog syntax: tickr --catalog {} check",
                path.display()
            )),
        };
        err.with_source(error)
    }

    /// A task id given on the command line is not defined
    pub fn unknown_task(task_id: &str, known: &[&str]) -> Self {
        let err = TickrError::new(format!("Task '{}' is not defined", task_id));
        let err = if known.is_empty() {
            err.with_context("The catalog defines no tasks")
        } else {
            err.with_context(format!("Defined tasks: {}", known.join(", ")))
        };
        err.with_suggestion("Add it under [tasks.<id>] in the catalog")
    }

    /// The daemon has nothing to wait for
    pub fn empty_schedule(path: &Path) -> Self {
        TickrError::new("No schedule entries can ever fire")
            .with_context(format!("Catalog: {}", path.display()))
            .with_suggestion("Add at least one [[schedule]] entry")
    }
}

impl fmt::Display for TickrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for TickrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Print an error to stderr, using the rich format when available
pub fn report(error: &anyhow::Error) {
    match error.downcast_ref::<TickrError>() {
        Some(err) => eprint!("{}", err),
        None => eprintln!("error: {:#}", error),
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
