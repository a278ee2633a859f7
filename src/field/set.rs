//! Tagged field variants and the declaration builder

use super::decl::{FieldDecl, FieldKind};
use super::resolver::FieldResolver;
use super::value::{FieldType, Timestamp};
use crate::sources::FlagSpec;

/// A field resolver tagged with its storage type
#[derive(Debug)]
pub enum Field<'a> {
    String(FieldResolver<'a, String>),
    Int(FieldResolver<'a, i64>),
    Float(FieldResolver<'a, f64>),
    Bool(FieldResolver<'a, bool>),
    Timestamp(FieldResolver<'a, Timestamp>),
}

/// Runs `$body` with `$resolver` bound to the typed resolver inside `$field`.
macro_rules! with_resolver {
    ($field:expr, $resolver:ident => $body:expr) => {
        match $field {
            $crate::field::Field::String($resolver) => $body,
            $crate::field::Field::Int($resolver) => $body,
            $crate::field::Field::Float($resolver) => $body,
            $crate::field::Field::Bool($resolver) => $body,
            $crate::field::Field::Timestamp($resolver) => $body,
        }
    };
}
pub(crate) use with_resolver;

impl Field<'_> {
    pub fn decl(&self) -> &FieldDecl {
        with_resolver!(self, resolver => resolver.decl())
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::String(_) => FieldKind::String,
            Field::Int(_) => FieldKind::Int,
            Field::Float(_) => FieldKind::Float64,
            Field::Bool(_) => FieldKind::Bool,
            Field::Timestamp(_) => FieldKind::Timestamp,
        }
    }

    pub fn flag_spec(&self) -> Option<FlagSpec> {
        with_resolver!(self, resolver => resolver.flag_spec())
    }

    pub fn bind_flag(&mut self, raw: Option<String>) {
        with_resolver!(self, resolver => resolver.bind_flag(raw))
    }
}

/// Ordered set of declared fields, each bound to its storage
///
/// # Examples
///
/// ```
/// use precedent::field::{FieldDecl, FieldSet};
///
/// let mut host = String::new();
/// let mut port = 0_i64;
///
/// let fields = FieldSet::new()
///     .field(&mut host, FieldDecl::new("Host").with_flag("host").with_default("localhost"))
///     .field(&mut port, FieldDecl::new("Port").with_flag("port").with_default("9000"));
///
/// assert_eq!(fields.len(), 2);
/// drop(fields);
/// assert_eq!(host, "localhost");
/// assert_eq!(port, 9000);
/// ```
#[derive(Debug, Default)]
pub struct FieldSet<'a> {
    fields: Vec<Field<'a>>,
}

impl<'a> FieldSet<'a> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declares a field stored in `slot`; the default is written immediately
    pub fn field<T: FieldType>(mut self, slot: &'a mut T, decl: FieldDecl) -> Self {
        self.fields.push(T::into_field(FieldResolver::new(slot, decl)));
        self
    }

    /// Appends an already built field
    pub fn push(&mut self, field: Field<'a>) {
        self.fields.push(field);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field<'a>> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for FieldSet<'a> {
    type Item = Field<'a>;
    type IntoIter = std::vec::IntoIter<Field<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> FromIterator<Field<'a>> for FieldSet<'a> {
    fn from_iter<I: IntoIterator<Item = Field<'a>>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
