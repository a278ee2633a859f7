// Precedent - layered configuration resolution
// Copyright (c) 2025 Precedent Contributors
// Licensed under the MIT License

use clap::Parser;
use precedent::cli::{Cli, Commands};
use precedent::logging::{init_logging, LoggingOptions};
use std::process;

fn main() {
    // The environment file is a resolution source of its own, so it is
    // never loaded into the process environment here.
    let cli = Cli::parse();

    let logging_options = LoggingOptions {
        json: cli.log_json,
        local_path: cli.log_dir.clone(),
    };
    let guard = match init_logging(&cli.log_level, &logging_options) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Precedent - layered configuration resolution"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors, flush the log writer first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Resolve(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
    }
}
