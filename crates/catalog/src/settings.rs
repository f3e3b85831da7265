// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog-wide settings

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tickr_core::DEFAULT_TIMEOUT;

/// Defaults applied to every module in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Default bound for a single external command
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Shell used for sourced-profile commands
    pub shell: String,
    /// Startup file sourced before sourced-profile commands
    pub rc: PathBuf,
    /// IANA timezone the cron expressions are evaluated in
    pub timezone: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            shell: "zsh".to_string(),
            rc: PathBuf::from("~/.zshrc"),
            timezone: "UTC".to_string(),
        }
    }
}
