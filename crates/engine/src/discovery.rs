// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact discovery: the newest file matching a glob under a root

use globset::{Glob, GlobMatcher};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("no file matching '{pattern}' under {}", .root.display())]
    NotFound { pattern: String, root: PathBuf },
    #[error("invalid artifact pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("artifact scan failed under {}: {message}", .root.display())]
    Walk { root: PathBuf, message: String },
}

/// Find the most recently modified regular file under `root` matching `pattern`.
///
/// Patterns without a `/` match the file name at any depth; patterns with one
/// match the path relative to `root`. Equal modification times resolve to the
/// lexicographically greatest path, so repeated calls on an unchanged tree
/// return the same file.
pub fn find_latest(root: &Path, pattern: &str) -> Result<PathBuf, DiscoveryError> {
    let matcher = compile(pattern)?;
    let by_name = !pattern.contains('/');

    let mut best: Option<(SystemTime, PathBuf)> = None;
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|error| DiscoveryError::Walk {
            root: root.to_path_buf(),
            message: error.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let matched = if by_name {
            matcher.is_match(entry.file_name())
        } else {
            matcher.is_match(path.strip_prefix(root).unwrap_or(path))
        };
        if !matched {
            continue;
        }
        let modified = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let newer = match &best {
            None => true,
            Some((when, current)) => (modified, path) > (*when, current.as_path()),
        };
        if newer {
            best = Some((modified, path.to_path_buf()));
        }
    }

    best.map(|(_, path)| path)
        .ok_or_else(|| DiscoveryError::NotFound {
            pattern: pattern.to_string(),
            root: root.to_path_buf(),
        })
}

fn compile(pattern: &str) -> Result<GlobMatcher, DiscoveryError> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|error| DiscoveryError::InvalidPattern {
            pattern: pattern.to_string(),
            message: error.to_string(),
        })
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
