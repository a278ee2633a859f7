//! Declaration file schema
//!
//! A declaration file describes one record as an array of `[[field]]` tables.

use crate::domain::{PrecedentError, Result};
use crate::field::{FieldDecl, FieldKind};
use serde::{Deserialize, Deserializer, Serialize};

/// Root of a declaration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeclarationFile {
    /// Field declarations, in order
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldDeclaration>,
}

/// One `[[field]]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// Field name, used as the key of the resolved record
    pub name: String,

    /// Declared type name (string, int, float64, bool, timestamp)
    #[serde(rename = "type")]
    pub type_name: String,

    /// Command-line flag name, without dashes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,

    /// Environment variable name, also looked up in the environment file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,

    /// Default value; scalars of any TOML type are accepted
    #[serde(default, deserialize_with = "deserialize_default")]
    pub default: String,

    /// Help text for the flag
    #[serde(default)]
    pub description: String,
}

impl FieldDeclaration {
    /// Semantic kind named by `type`
    ///
    /// # Errors
    ///
    /// Returns [`PrecedentError::UnsupportedType`] for unknown type names.
    pub fn kind(&self) -> Result<FieldKind> {
        FieldKind::parse_for(&self.name, &self.type_name)
    }

    /// Validates the declaration shape
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PrecedentError::Configuration(
                "field name cannot be empty".to_string(),
            ));
        }
        self.kind()?;
        Ok(())
    }

    pub fn to_decl(&self) -> FieldDecl {
        let mut decl = FieldDecl::new(&self.name)
            .with_default(&self.default)
            .with_description(&self.description);
        if let Some(flag) = &self.flag {
            decl = decl.with_flag(flag);
        }
        if let Some(env) = &self.env {
            decl = decl.with_env(env);
        }
        decl
    }
}

/// Stringifies a scalar TOML default
fn deserialize_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match toml::Value::deserialize(deserializer)? {
        toml::Value::String(s) => Ok(s),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Datetime(dt) => Ok(dt.to_string()),
        other => Err(D::Error::custom(format!(
            "default must be a scalar, found {}",
            other.type_str()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_content: &str) -> DeclarationFile {
        toml::from_str(toml_content).unwrap()
    }

    #[test]
    fn test_parse_full_declaration() {
        let file = parse(
            r#"
[[field]]
name = "Host"
type = "string"
flag = "host"
env = "HOST"
default = "localhost:8080"
description = "Host and port to bind to"
"#,
        );

        assert_eq!(file.fields.len(), 1);
        let field = &file.fields[0];
        assert_eq!(field.name, "Host");
        assert_eq!(field.kind().unwrap(), FieldKind::String);
        assert_eq!(field.flag.as_deref(), Some("host"));
        assert_eq!(field.env.as_deref(), Some("HOST"));
        assert_eq!(field.default, "localhost:8080");

        let decl = field.to_decl();
        assert_eq!(decl.flag(), Some("host"));
        assert_eq!(decl.env(), Some("HOST"));
        assert_eq!(decl.description(), "Host and port to bind to");
    }

    #[test]
    fn test_scalar_defaults_are_stringified() {
        let file = parse(
            r#"
[[field]]
name = "Port"
type = "int"
default = 9000

[[field]]
name = "Timeout"
type = "float64"
default = 30.5

[[field]]
name = "Debug"
type = "bool"
default = true

[[field]]
name = "StartTime"
type = "timestamp"
default = 2025-01-02T13:14:15Z
"#,
        );

        let defaults: Vec<&str> = file.fields.iter().map(|f| f.default.as_str()).collect();
        assert_eq!(defaults, ["9000", "30.5", "true", "2025-01-02T13:14:15Z"]);
    }

    #[test]
    fn test_missing_default_is_empty() {
        let file = parse("[[field]]\nname = \"Host\"\ntype = \"string\"\n");
        assert_eq!(file.fields[0].default, "");
        assert!(file.fields[0].flag.is_none());
    }

    #[test]
    fn test_array_default_rejected() {
        let result = toml::from_str::<DeclarationFile>(
            "[[field]]\nname = \"Tags\"\ntype = \"string\"\ndefault = [\"a\"]\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_unsupported_type() {
        let file = parse("[[field]]\nname = \"Wait\"\ntype = \"duration\"\n");
        let err = file.fields[0].validate().unwrap_err();
        assert!(err.to_string().contains("duration"));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let file = parse("[[field]]\nname = \" \"\ntype = \"int\"\n");
        assert!(file.fields[0].validate().is_err());
    }
}
