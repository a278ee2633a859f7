//! Result type alias for Precedent

use super::errors::PrecedentError;

/// Result type alias for Precedent operations
///
/// # Examples
///
/// ```
/// use precedent::domain::result::Result;
/// use precedent::domain::errors::PrecedentError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PrecedentError::MissingFlagName("Host".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PrecedentError>;
