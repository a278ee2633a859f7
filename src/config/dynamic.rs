//! Records whose fields are declared at run time

use super::schema::FieldDeclaration;
use crate::domain::{PrecedentError, Result};
use crate::engine::Configurable;
use crate::field::{zero_timestamp, FieldDecl, FieldKind, FieldSet, Timestamp};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Value of one dynamically declared field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(Timestamp),
}

impl FieldValue {
    /// Zero value for `kind`
    pub fn zero(kind: FieldKind) -> Self {
        match kind {
            FieldKind::String => FieldValue::String(String::new()),
            FieldKind::Int => FieldValue::Int(0),
            FieldKind::Float64 => FieldValue::Float(0.0),
            FieldKind::Bool => FieldValue::Bool(false),
            FieldKind::Timestamp => FieldValue::Timestamp(zero_timestamp()),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::String(_) => FieldKind::String,
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::Float(_) => FieldKind::Float64,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Timestamp(_) => FieldKind::Timestamp,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            FieldValue::Timestamp(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Float(x) => write!(f, "{x}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Timestamp(t) => f.write_str(&t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone)]
struct DynamicEntry {
    decl: FieldDecl,
    value: FieldValue,
}

/// A record built from field declarations
///
/// Every field starts at its type's zero value; declaring the fields during
/// a resolution pass writes the defaults.
///
/// # Examples
///
/// ```
/// use precedent::config::{parse_declarations, DynamicConfig};
/// use precedent::engine::PrecedenceEngine;
/// use precedent::sources::{Env, FlagContext};
///
/// let declarations = parse_declarations(r#"
/// [[field]]
/// name = "Port"
/// type = "int"
/// flag = "port"
/// env = "PORT"
/// default = 9000
/// "#).unwrap();
///
/// let mut config = DynamicConfig::from_declarations(&declarations).unwrap();
/// let engine = PrecedenceEngine::new()
///     .with_env(Env::from_vars([("PORT", "8080")]))
///     .without_env_file();
/// engine.resolve(&mut config, &mut FlagContext::from_args(["app"])).unwrap();
///
/// assert_eq!(config.get("Port").and_then(|v| v.as_int()), Some(8080));
/// ```
#[derive(Debug, Clone)]
pub struct DynamicConfig {
    entries: Vec<DynamicEntry>,
}

impl DynamicConfig {
    /// Builds a record from declarations
    ///
    /// # Errors
    ///
    /// Returns [`PrecedentError::NotARecord`] for an empty declaration list,
    /// [`PrecedentError::UnsupportedType`] for unknown type names, and
    /// [`PrecedentError::Configuration`] for empty or duplicate names.
    pub fn from_declarations(declarations: &[FieldDeclaration]) -> Result<Self> {
        if declarations.is_empty() {
            return Err(PrecedentError::NotARecord(
                "no fields declared".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(declarations.len());
        for declaration in declarations {
            declaration.validate()?;
            if !seen.insert(declaration.name.as_str()) {
                return Err(PrecedentError::Configuration(format!(
                    "field '{}' is declared more than once",
                    declaration.name
                )));
            }
            entries.push(DynamicEntry {
                decl: declaration.to_decl(),
                value: FieldValue::zero(declaration.kind()?),
            });
        }

        Ok(Self { entries })
    }

    /// Current value of `name`
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|entry| entry.decl.name() == name)
            .map(|entry| &entry.value)
    }

    /// Field names and values, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries
            .iter()
            .map(|entry| (entry.decl.name(), &entry.value))
    }

    /// Declarations, in order
    pub fn declarations(&self) -> impl Iterator<Item = &FieldDecl> {
        self.entries.iter().map(|entry| &entry.decl)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Configurable for DynamicConfig {
    fn fields(&mut self) -> FieldSet<'_> {
        self.entries
            .iter_mut()
            .fold(FieldSet::new(), |set, DynamicEntry { decl, value }| {
                let decl = decl.clone();
                match value {
                    FieldValue::String(slot) => set.field(slot, decl),
                    FieldValue::Int(slot) => set.field(slot, decl),
                    FieldValue::Float(slot) => set.field(slot, decl),
                    FieldValue::Bool(slot) => set.field(slot, decl),
                    FieldValue::Timestamp(slot) => set.field(slot, decl),
                }
            })
    }
}

impl Serialize for DynamicConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
