// Precedent - layered configuration resolution
// Copyright (c) 2025 Precedent Contributors
// Licensed under the MIT License

//! # Precedent - layered configuration resolution
//!
//! Precedent fills the fields of a configuration record from four sources,
//! each overriding the one before it:
//!
//! ```text
//! default < environment variable < .env file < command-line flag
//! ```
//!
//! A value that fails to parse as its field's type is ignored and the next
//! lower source wins, so a malformed override never aborts resolution.
//!
//! ## Architecture
//!
//! - [`field`] - Field declarations, supported value types and per-field resolvers
//! - [`sources`] - Environment, environment file and command-line flag sources
//! - [`engine`] - The precedence engine and its resolution report
//! - [`config`] - Records declared at run time by a TOML file
//! - [`domain`] - Error and result types
//! - [`logging`] - Structured logging setup
//! - [`cli`] - Command-line interface of the `precedent` binary
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use precedent::{Configurable, FieldDecl, FieldSet, FlagContext};
//!
//! #[derive(Default)]
//! struct ServerConfig {
//!     host: String,
//!     port: i64,
//!     debug: bool,
//! }
//!
//! impl Configurable for ServerConfig {
//!     fn fields(&mut self) -> FieldSet<'_> {
//!         FieldSet::new()
//!             .field(
//!                 &mut self.host,
//!                 FieldDecl::new("Host").with_flag("host").with_env("HOST").with_default("localhost:8080"),
//!             )
//!             .field(
//!                 &mut self.port,
//!                 FieldDecl::new("Port").with_flag("port").with_env("PORT").with_default("9000"),
//!             )
//!             .field(
//!                 &mut self.debug,
//!                 FieldDecl::new("Debug").with_flag("debug").with_env("DEBUG").with_default("false"),
//!             )
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = ServerConfig::default();
//!     let report = precedent::resolve(&mut config, &mut FlagContext::from_env())?;
//!
//!     println!("listening on {} (port from {:?})", config.host, report.source_of("Port"));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], whose error type is
//! [`domain::PrecedentError`]. Parse failures of individual values are not
//! errors; they are logged at `debug` level and skipped.

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod field;
pub mod logging;
pub mod sources;

pub use domain::{PrecedentError, Result};
pub use engine::{resolve, Configurable, PrecedenceEngine, ResolutionReport, Source};
pub use field::{FieldDecl, FieldSet};
pub use sources::{Env, FlagContext};
