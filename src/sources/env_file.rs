//! Environment file loading
//!
//! Lines are parsed by `dotenvy`; the process environment is never modified.

use crate::domain::{PrecedentError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Default environment file, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Variables read from an environment file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    /// Loads `path`; a missing file yields an empty mapping
    ///
    /// # Errors
    ///
    /// Returns [`PrecedentError::EnvFile`] if the file exists but cannot be
    /// read or contains a malformed line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No environment file, using empty mapping");
            return Ok(Self::default());
        }

        let env_file_error = |e: dotenvy::Error| PrecedentError::EnvFile {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let mut vars = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(env_file_error)? {
            let (key, value) = item.map_err(env_file_error)?;
            vars.insert(key, value);
        }

        tracing::debug!(path = %path.display(), count = vars.len(), "Loaded environment file");
        Ok(Self { vars })
    }

    /// Builds a mapping directly; later pairs replace earlier ones
    pub fn from_pairs(pairs: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
