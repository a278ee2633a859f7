//! Domain error types and the crate-wide result alias.
//!
//! All fallible operations return [`Result<T, PrecedentError>`]:
//!
//! ```rust
//! use precedent::domain::{PrecedentError, Result};
//!
//! fn check_flag(name: Option<&str>) -> Result<&str> {
//!     name.ok_or_else(|| PrecedentError::MissingFlagName("Host".to_string()))
//! }
//! # assert!(check_flag(None).is_err());
//! ```

pub mod errors;
pub mod result;

pub use errors::PrecedentError;
pub use result::Result;
