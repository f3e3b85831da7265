// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! References from configuration to pluggable modules

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Errors decoding a module's parameters
#[derive(Debug, Error)]
#[error("invalid parameters for module kind '{kind}': {source}")]
pub struct ModuleRefError {
    pub kind: String,
    #[source]
    pub source: serde_json::Error,
}

/// A module reference: the registered `kind` plus its parameters.
///
/// In configuration this is a single table, e.g.
/// `{ kind = "path-exists", path = "/tmp/flag", task = "cleanup" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRef {
    pub kind: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl ModuleRef {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: Map::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Decode the parameters into a module-specific type
    pub fn params<T: DeserializeOwned>(&self) -> Result<T, ModuleRefError> {
        serde_json::from_value(Value::Object(self.params.clone())).map_err(|source| {
            ModuleRefError {
                kind: self.kind.clone(),
                source,
            }
        })
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[cfg(test)]
#[path = "module_tests.rs"]
mod tests;
