//! Logging and observability
//!
//! Resolution emits `tracing` events with structured fields:
//! - `info` once per pass with per-source counts
//! - `debug` per field with the winning source, and for every source value
//!   that failed to parse and was ignored
//! - `warn` for fields excluded because they declare no flag
//!
//! Binaries install a subscriber with [`init_logging`].

pub mod structured;

pub use structured::{init_logging, LoggingGuard, LoggingOptions};
