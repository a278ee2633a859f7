//! Field declarations and semantic kinds

use crate::domain::{PrecedentError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a configuration field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// UTF-8 string
    String,
    /// Signed 64-bit integer
    Int,
    /// 64-bit floating point
    Float64,
    /// Boolean
    Bool,
    /// Point in time with a fixed UTC offset
    Timestamp,
}

impl FieldKind {
    /// All supported kinds, in declaration order
    pub const ALL: [FieldKind; 5] = [
        FieldKind::String,
        FieldKind::Int,
        FieldKind::Float64,
        FieldKind::Bool,
        FieldKind::Timestamp,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int => "int",
            FieldKind::Float64 => "float64",
            FieldKind::Bool => "bool",
            FieldKind::Timestamp => "timestamp",
        }
    }

    /// Placeholder shown for the flag's value in help output
    pub fn value_name(&self) -> &'static str {
        match self {
            FieldKind::String => "STRING",
            FieldKind::Int => "INT",
            FieldKind::Float64 => "FLOAT",
            FieldKind::Bool => "BOOL",
            FieldKind::Timestamp => "TIMESTAMP",
        }
    }

    /// Resolves a declared type name for `field`.
    ///
    /// # Errors
    ///
    /// Returns [`PrecedentError::UnsupportedType`] naming the offending type.
    pub fn parse_for(field: &str, type_name: &str) -> Result<Self> {
        let kind = match type_name.trim().to_ascii_lowercase().as_str() {
            "string" | "str" => FieldKind::String,
            "int" | "integer" | "i64" => FieldKind::Int,
            "float64" | "float" | "f64" => FieldKind::Float64,
            "bool" | "boolean" => FieldKind::Bool,
            "timestamp" | "time" | "datetime" => FieldKind::Timestamp,
            _ => {
                return Err(PrecedentError::UnsupportedType {
                    field: field.to_string(),
                    type_name: type_name.to_string(),
                })
            }
        };
        Ok(kind)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static metadata describing one configuration field
///
/// The semantic type is not part of the declaration: it comes from the
/// storage the declaration is bound to in a [`FieldSet`](super::FieldSet).
///
/// # Examples
///
/// ```
/// use precedent::field::FieldDecl;
///
/// let decl = FieldDecl::new("Host")
///     .with_flag("host")
///     .with_env("HOST")
///     .with_default("localhost:8080")
///     .with_description("Host and port to bind to");
///
/// assert_eq!(decl.flag(), Some("host"));
/// assert_eq!(decl.default_str(), "localhost:8080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldDecl {
    name: String,
    default: String,
    env: Option<String>,
    flag: Option<String>,
    description: String,
}

impl FieldDecl {
    /// Creates a declaration with no sources and an empty default
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the command-line flag name (without leading dashes)
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    /// Sets the environment variable name, used for both the process
    /// environment and the environment file
    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// Sets the raw default string
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Sets the description shown in flag help
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_str(&self) -> &str {
        &self.default
    }

    /// Environment variable name; empty names count as undeclared
    pub fn env(&self) -> Option<&str> {
        self.env.as_deref().filter(|name| !name.is_empty())
    }

    /// Flag name; empty names count as undeclared
    pub fn flag(&self) -> Option<&str> {
        self.flag.as_deref().filter(|name| !name.is_empty())
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("string", FieldKind::String)]
    #[test_case("int", FieldKind::Int)]
    #[test_case("Integer", FieldKind::Int)]
    #[test_case("float64", FieldKind::Float64)]
    #[test_case("FLOAT", FieldKind::Float64)]
    #[test_case("bool", FieldKind::Bool)]
    #[test_case("boolean", FieldKind::Bool)]
    #[test_case("timestamp", FieldKind::Timestamp)]
    #[test_case("time", FieldKind::Timestamp)]
    fn test_parse_supported_kind(name: &str, expected: FieldKind) {
        assert_eq!(FieldKind::parse_for("Field", name).unwrap(), expected);
    }

    #[test]
    fn test_parse_unsupported_kind_names_type() {
        let err = FieldKind::parse_for("Tags", "[]string").unwrap_err();
        match err {
            PrecedentError::UnsupportedType { field, type_name } => {
                assert_eq!(field, "Tags");
                assert_eq!(type_name, "[]string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_kind_display_round_trips_through_parse() {
        for kind in FieldKind::ALL {
            assert_eq!(FieldKind::parse_for("f", &kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn test_empty_source_names_are_undeclared() {
        let decl = FieldDecl::new("Host").with_flag("").with_env("");
        assert_eq!(decl.flag(), None);
        assert_eq!(decl.env(), None);
    }

    #[test]
    fn test_new_declaration_has_no_sources() {
        let decl = FieldDecl::new("Port");
        assert_eq!(decl.name(), "Port");
        assert_eq!(decl.default_str(), "");
        assert!(decl.flag().is_none());
        assert!(decl.env().is_none());
        assert_eq!(decl.description(), "");
    }
}
