//! Per-field resolver
//!
//! A [`FieldResolver`] translates raw strings from each source into the
//! field's storage type and writes the chosen value into the caller's record.

use super::decl::FieldDecl;
use super::value::FieldType;
use crate::sources::{Env, EnvFile, FlagPresence, FlagSpec};
use std::cell::OnceCell;

/// Resolver for a single field stored as `T`
///
/// Holds exclusive access to the field's storage for as long as it lives.
/// Construction writes the parsed default into storage.
#[derive(Debug)]
pub struct FieldResolver<'a, T: FieldType> {
    decl: FieldDecl,
    slot: &'a mut T,
    default: OnceCell<T>,
    flag: Option<String>,
}

impl<'a, T: FieldType> FieldResolver<'a, T> {
    /// Binds `decl` to `slot` and materializes the default
    pub fn new(slot: &'a mut T, decl: FieldDecl) -> Self {
        let mut resolver = Self {
            decl,
            slot,
            default: OnceCell::new(),
            flag: None,
        };
        let default = resolver.default_value();
        resolver.set_value(default);
        resolver
    }

    pub fn decl(&self) -> &FieldDecl {
        &self.decl
    }

    /// Flag registration data, `None` when no flag name was declared
    pub fn flag_spec(&self) -> Option<FlagSpec> {
        self.decl.flag().map(|name| FlagSpec {
            name: name.to_string(),
            kind: T::KIND,
            default: self.decl.default_str().to_string(),
            description: self.decl.description().to_string(),
        })
    }

    /// Records the raw value supplied on the command line, if any
    pub fn bind_flag(&mut self, raw: Option<String>) {
        self.flag = raw;
    }

    /// Parsed default, or the type's zero value when the default is invalid
    pub fn default_value(&self) -> T {
        self.default
            .get_or_init(|| T::parse_raw(self.decl.default_str()).unwrap_or_else(T::zero))
            .clone()
    }

    /// Value of the process environment variable
    pub fn env_value(&self, env: &Env) -> Option<T> {
        let name = self.decl.env()?;
        let raw = env.var(name)?;
        self.parse_source(&raw, "environment")
    }

    /// Value of the variable in the environment file
    pub fn env_file_value(&self, env_file: &EnvFile) -> Option<T> {
        let name = self.decl.env()?;
        let raw = env_file.get(name)?;
        self.parse_source(raw, "env_file")
    }

    /// Value supplied on the command line
    ///
    /// Under [`FlagPresence::DiffersFromDefault`] a supplied value equal to
    /// the default is reported as absent.
    pub fn flag_value(&self, presence: FlagPresence) -> Option<T> {
        let raw = self.flag.as_deref()?;
        let value = self.parse_source(raw, "flag")?;
        match presence {
            FlagPresence::Explicit => Some(value),
            FlagPresence::DiffersFromDefault => (value != self.default_value()).then_some(value),
        }
    }

    pub fn set_value(&mut self, value: T) {
        *self.slot = value;
    }

    /// Current value in storage
    pub fn value(&self) -> &T {
        &*self.slot
    }

    fn parse_source(&self, raw: &str, source: &'static str) -> Option<T> {
        if raw.is_empty() {
            return None;
        }
        let parsed = T::parse_raw(raw);
        if parsed.is_none() {
            tracing::debug!(
                field = %self.decl.name(),
                source,
                kind = %T::KIND,
                "Ignoring value that does not parse"
            );
        }
        parsed
    }
}
