// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Module registry: maps a reference's `kind` to a factory

use crate::error::LoadError;
use crate::predicate::{Always, PathExists, Predicate, RemoteAhead};
use crate::task::{GitSyncShip, ShellSteps, TaskModule};
use std::collections::BTreeMap;
use std::sync::Arc;
use tickr_catalog::Settings;
use tickr_core::ModuleRef;

/// Catalog context available to factories
#[derive(Debug, Clone, Copy)]
pub struct LoadContext<'a> {
    pub settings: &'a Settings,
}

pub type PredicateFactory =
    Arc<dyn Fn(&ModuleRef, LoadContext<'_>) -> Result<Box<dyn Predicate>, LoadError> + Send + Sync>;
pub type TaskFactory =
    Arc<dyn Fn(&ModuleRef, LoadContext<'_>) -> Result<Box<dyn TaskModule>, LoadError> + Send + Sync>;

/// Registered predicate and task kinds.
///
/// Loading is a pure function of the reference and settings, so every call
/// yields a fresh module reflecting the current catalog.
#[derive(Clone, Default)]
pub struct Registry {
    predicates: BTreeMap<String, PredicateFactory>,
    tasks: BTreeMap<String, TaskFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in kind
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_predicate("always", |module, _| {
            Ok(Box::new(module.params::<Always>()?))
        });
        registry.register_predicate("path-exists", |module, _| {
            Ok(Box::new(module.params::<PathExists>()?))
        });
        registry.register_predicate("remote-ahead", |module, ctx| {
            let mut predicate: RemoteAhead = module.params()?;
            predicate.timeout.get_or_insert(ctx.settings.timeout);
            Ok(Box::new(predicate))
        });
        registry.register_task("git-sync-ship", |module, ctx| {
            let mut task: GitSyncShip = module.params()?;
            task.validate().map_err(|message| LoadError::Invalid {
                kind: module.kind.clone(),
                message,
            })?;
            task.timeout.get_or_insert(ctx.settings.timeout);
            Ok(Box::new(task))
        });
        registry.register_task("shell-steps", |module, ctx| {
            let mut task: ShellSteps = module.params()?;
            task.timeout.get_or_insert(ctx.settings.timeout);
            Ok(Box::new(task))
        });
        registry
    }

    pub fn register_predicate<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&ModuleRef, LoadContext<'_>) -> Result<Box<dyn Predicate>, LoadError>
            + Send
            + Sync
            + 'static,
    {
        self.predicates.insert(kind.into(), Arc::new(factory));
    }

    pub fn register_task<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&ModuleRef, LoadContext<'_>) -> Result<Box<dyn TaskModule>, LoadError>
            + Send
            + Sync
            + 'static,
    {
        self.tasks.insert(kind.into(), Arc::new(factory));
    }

    pub fn load_predicate(
        &self,
        module: &ModuleRef,
        ctx: LoadContext<'_>,
    ) -> Result<Box<dyn Predicate>, LoadError> {
        let factory = self
            .predicates
            .get(&module.kind)
            .ok_or_else(|| LoadError::UnknownKind {
                role: "predicate",
                kind: module.kind.clone(),
            })?;
        factory(module, ctx)
    }

    pub fn load_task(
        &self,
        module: &ModuleRef,
        ctx: LoadContext<'_>,
    ) -> Result<Box<dyn TaskModule>, LoadError> {
        let factory = self
            .tasks
            .get(&module.kind)
            .ok_or_else(|| LoadError::UnknownKind {
                role: "task",
                kind: module.kind.clone(),
            })?;
        factory(module, ctx)
    }

    pub fn predicate_kinds(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }

    pub fn task_kinds(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
