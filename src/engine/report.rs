//! Resolution report
//!
//! Records which source produced each field's final value.

use serde::Serialize;
use std::fmt;

/// Source that produced a field's final value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Declared default (or the type's zero value)
    Default,
    /// Process environment variable
    Environment,
    /// Environment file entry
    EnvFile,
    /// Command-line flag
    Flag,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Default => "default",
            Source::Environment => "environment",
            Source::EnvFile => "env_file",
            Source::Flag => "flag",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome for one resolved field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
    pub name: String,
    pub source: Source,
}

/// Outcome of one resolution pass, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    pub fields: Vec<ResolvedField>,
    /// Fields excluded from resolution because they declare no flag name
    pub skipped: Vec<String>,
}

impl ResolutionReport {
    pub(crate) fn record(&mut self, name: &str, source: Source) {
        self.fields.push(ResolvedField {
            name: name.to_string(),
            source,
        });
    }

    pub(crate) fn skip(&mut self, name: &str) {
        self.skipped.push(name.to_string());
    }

    /// Winning source for `name`, `None` if the field was not resolved
    pub fn source_of(&self, name: &str) -> Option<Source> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.source)
    }

    /// Number of resolved fields whose value came from `source`
    pub fn count(&self, source: Source) -> usize {
        self.fields.iter().filter(|field| field.source == source).count()
    }
}
