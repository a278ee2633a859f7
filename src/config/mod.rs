//! Run-time declared records.
//!
//! Records whose shape is only known at run time are described by a TOML
//! declaration file:
//!
//! ```toml
//! [[field]]
//! name = "Host"
//! type = "string"
//! flag = "host"
//! env = "HOST"
//! default = "localhost:8080"
//! description = "Host and port to bind to"
//!
//! [[field]]
//! name = "Port"
//! type = "int"
//! flag = "port"
//! env = "PORT"
//! default = 9000
//! ```
//!
//! [`load_declarations`] reads the file and [`DynamicConfig`] turns the
//! declarations into a record the [`PrecedenceEngine`](crate::engine::PrecedenceEngine)
//! can resolve. Declared types outside `string`, `int`, `float64`, `bool`
//! and `timestamp` are rejected with the offending type name.

pub mod dynamic;
pub mod loader;
pub mod schema;

pub use dynamic::{DynamicConfig, FieldValue};
pub use loader::{load_declarations, parse_declarations};
pub use schema::{DeclarationFile, FieldDeclaration};
