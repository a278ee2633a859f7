//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the `precedent` binary
//! using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Precedent - layered configuration resolution
#[derive(Parser, Debug)]
#[command(name = "precedent")]
#[command(version, about, long_about = None)]
#[command(author = "Precedent Contributors")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "warn", env = "PRECEDENT_LOG_LEVEL")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Also write JSON logs to a daily-rolling file in this directory
    #[arg(long, global = true, env = "PRECEDENT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a declared record and print the result
    Resolve(commands::resolve::ResolveArgs),

    /// Validate a declaration file
    Validate(commands::validate::ValidateArgs),
}
