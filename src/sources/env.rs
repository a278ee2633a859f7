//! Environment variable lookups.
//!
//! Production code uses [`Env::process()`] which delegates to
//! [`std::env::var`]. Tests and embedders use [`Env::from_vars()`] backed by a
//! `HashMap`, so resolution can run without touching the process environment.

use std::collections::HashMap;

/// Read-only environment variable reader
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Reads from the real process environment
    pub fn process() -> Self {
        Self { overrides: None }
    }

    /// Reads from a fixed set of variables; the process environment is ignored
    pub fn from_vars(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Value of `name`, `None` when unset, empty, or not valid unicode
    pub fn var(&self, name: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Whether the reader is backed by the process environment
    pub fn is_process(&self) -> bool {
        self.overrides.is_none()
    }
}
