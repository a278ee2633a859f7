//! Field declarations and per-field resolution.
//!
//! A record declares its fields by binding each storage location to a
//! [`FieldDecl`] inside a [`FieldSet`]. The storage type picks the parser:
//!
//! | Storage | Kind | Accepted input |
//! |---|---|---|
//! | `String` | `string` | any non-empty string |
//! | `i64` | `int` | base-10 integer |
//! | `f64` | `float64` | decimal floating point |
//! | `bool` | `bool` | `1 t T TRUE true True 0 f F FALSE false False` |
//! | [`Timestamp`] | `timestamp` | `YYYY-MM-DD`, `YYYY-MM-DD hh:mm:ss`, `YYYY-MM-DDThh:mm:ss`, `YYYY-MM-DDThh:mm:ssZ`, `YYYY-MM-DDThh:mm:ss MST`, `YYYY-MM-DDThh:mm:ss-0700` |
//!
//! Values that fail to parse are treated as absent, never as errors.

pub mod decl;
pub mod resolver;
pub mod set;
pub mod value;

pub use decl::{FieldDecl, FieldKind};
pub use resolver::FieldResolver;
pub(crate) use set::with_resolver;
pub use set::{Field, FieldSet};
pub use value::{parse_timestamp, zero_timestamp, FieldType, Timestamp};
