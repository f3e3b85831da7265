// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dry-run toggle read from the environment

/// Variables consulted for the toggle, in precedence order
pub const DRY_RUN_VARS: [&str; 2] = ["TICKR_DRY_RUN", "DRY_RUN"];

/// Whether a value is one of the accepted truthy spellings
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Resolve the toggle through `lookup`.
///
/// The first variable in [`DRY_RUN_VARS`] that is set decides, even when its
/// value is falsy.
pub fn dry_run_from_lookup<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    DRY_RUN_VARS
        .iter()
        .find_map(|name| lookup(name))
        .is_some_and(|value| is_truthy(&value))
}

/// Resolve the toggle from the process environment
pub fn dry_run_from_env() -> bool {
    dry_run_from_lookup(|name| std::env::var(name).ok())
}

#[cfg(test)]
#[path = "dry_run_tests.rs"]
mod tests;
