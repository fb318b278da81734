//! Custom prepare/clean hooks.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::value::FieldValue;

/// Turns a bound object value into the strings shown in the form control.
pub type PrepareFn = Arc<dyn Fn(&Value) -> Vec<String> + Send + Sync>;

/// Post-processes a coerced value. Returning `Err` rejects it with a message.
pub type CleanFn = Arc<dyn Fn(FieldValue) -> Result<FieldValue, String> + Send + Sync>;

/// Form-level hooks keyed by declared field name.
///
/// The registry is consulted once when a form is bound. A hook is attached to
/// a field only if the field did not declare its own.
#[derive(Clone, Default)]
pub struct HookRegistry {
    prepare: HashMap<String, PrepareFn>,
    clean: HashMap<String, CleanFn>,
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut prepare: Vec<&String> = self.prepare.keys().collect();
        let mut clean: Vec<&String> = self.clean.keys().collect();
        prepare.sort();
        clean.sort();
        f.debug_struct("HookRegistry")
            .field("prepare", &prepare)
            .field("clean", &clean)
            .finish()
    }
}

impl HookRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a prepare hook for a field.
    pub fn prepare<F>(&mut self, field: impl Into<String>, hook: F) -> &mut Self
    where
        F: Fn(&Value) -> Vec<String> + Send + Sync + 'static,
    {
        self.prepare.insert(field.into(), Arc::new(hook));
        self
    }

    /// Registers a clean hook for a field.
    pub fn clean<F>(&mut self, field: impl Into<String>, hook: F) -> &mut Self
    where
        F: Fn(FieldValue) -> Result<FieldValue, String> + Send + Sync + 'static,
    {
        self.clean.insert(field.into(), Arc::new(hook));
        self
    }

    /// Returns the prepare hook registered for a field.
    pub fn get_prepare(&self, field: &str) -> Option<&PrepareFn> {
        self.prepare.get(field)
    }

    /// Returns the clean hook registered for a field.
    pub fn get_clean(&self, field: &str) -> Option<&CleanFn> {
        self.clean.get(field)
    }

    /// Names that have at least one hook, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .prepare
            .keys()
            .chain(self.clean.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Returns whether no hook is registered.
    pub fn is_empty(&self) -> bool {
        self.prepare.is_empty() && self.clean.is_empty()
    }
}
