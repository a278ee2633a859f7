//! Override sources consulted by a resolution pass.
//!
//! - [`Env`] - process environment lookups
//! - [`EnvFile`] - variables from a local `.env` file
//! - [`FlagContext`] - command-line flags, registered once per context

pub mod env;
pub mod env_file;
pub mod flags;

pub use env::Env;
pub use env_file::{EnvFile, DEFAULT_ENV_FILE};
pub use flags::{FlagContext, FlagMatches, FlagPresence, FlagSpec};
