//! Precedence resolution over a caller-owned record.
//!
//! A record implements [`Configurable`] by listing its fields; the
//! [`PrecedenceEngine`] then resolves each one:
//!
//! ```text
//! default < environment variable < environment file < flag
//! ```

pub mod precedence;
pub mod report;

use crate::domain::Result;
use crate::field::FieldSet;
use crate::sources::FlagContext;

pub use precedence::{MissingFlagPolicy, PrecedenceEngine};
pub use report::{ResolutionReport, ResolvedField, Source};

/// A record whose fields can be resolved
pub trait Configurable {
    /// Declares every field, binding each declaration to its storage.
    ///
    /// Called once per resolution pass. Declaring a field writes its default.
    fn fields(&mut self) -> FieldSet<'_>;
}

/// Resolves `config` with the default engine options.
///
/// # Errors
///
/// See [`PrecedenceEngine::resolve`].
pub fn resolve<C>(config: &mut C, flags: &mut FlagContext) -> Result<ResolutionReport>
where
    C: Configurable + ?Sized,
{
    PrecedenceEngine::new().resolve(config, flags)
}
