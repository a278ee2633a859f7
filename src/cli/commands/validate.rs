//! Validate command implementation
//!
//! Checks a declaration file without consulting the environment or any
//! command-line flags: every type must be supported and every flag name
//! must be unique. Fields without a flag are reported but not rejected.

use crate::config::{load_declarations, DynamicConfig};
use crate::engine::{MissingFlagPolicy, PrecedenceEngine};
use crate::sources::{Env, FlagContext};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Declaration file describing the record
    #[arg(short, long, env = "PRECEDENT_DECLARATIONS")]
    pub declarations: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(declarations = %self.declarations.display(), "Validating declarations");

        let declarations = match load_declarations(&self.declarations) {
            Ok(declarations) => declarations,
            Err(e) => {
                println!("Failed to load declaration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let mut config = match DynamicConfig::from_declarations(&declarations) {
            Ok(config) => config,
            Err(e) => {
                println!("Invalid declarations");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        // Defaults only; flag names are still checked for clashes
        let engine = PrecedenceEngine::new()
            .with_env(Env::from_vars(Vec::<(String, String)>::new()))
            .without_env_file()
            .with_missing_flag_policy(MissingFlagPolicy::Skip);
        let mut flags = FlagContext::from_args([env!("CARGO_PKG_NAME")]);
        let report = match engine.resolve(&mut config, &mut flags) {
            Ok(report) => report,
            Err(e) => {
                println!("Invalid declarations");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("Declarations are valid");
        println!();
        println!("Fields:");
        for (decl, (_, value)) in config.declarations().zip(config.iter()) {
            println!(
                "  {} ({}) flag: {} env: {} default: {}",
                decl.name(),
                value.kind(),
                decl.flag().map_or_else(|| "-".to_string(), |f| format!("--{f}")),
                decl.env().unwrap_or("-"),
                value
            );
        }

        if !report.skipped.is_empty() {
            println!();
            println!(
                "Warning: {} field(s) declare no flag and fail resolution unless --skip-unflagged is given: {}",
                report.skipped.len(),
                report.skipped.join(", ")
            );
        }

        Ok(0)
    }
}
