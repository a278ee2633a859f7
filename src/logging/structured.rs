//! Structured logging setup using tracing
//!
//! Console output goes to stderr so that resolved configuration printed on
//! stdout stays machine-readable. An optional daily-rolling JSON file can be
//! enabled for long-running processes.

use crate::domain::{PrecedentError, Result};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Logging options
#[derive(Debug, Clone, Default)]
pub struct LoggingOptions {
    /// Emit console logs as JSON
    pub json: bool,
    /// Directory for a daily-rolling JSON log file
    pub local_path: Option<PathBuf>,
}

/// Guard that must be kept alive for the duration of the program
/// to ensure logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over `log_level_str` when set.
///
/// # Example
///
/// ```no_run
/// use precedent::logging::{init_logging, LoggingOptions};
///
/// let _guard = init_logging("info", &LoggingOptions::default())
///     .expect("Failed to initialize logging");
/// tracing::info!("Application started");
/// ```
pub fn init_logging(log_level_str: &str, options: &LoggingOptions) -> Result<LoggingGuard> {
    let log_level = parse_log_level(log_level_str)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("precedent={}", log_level)));

    let mut layers = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    if options.json {
        layers.push(console_layer.json().with_filter(env_filter.clone()).boxed());
    } else {
        layers.push(console_layer.with_filter(env_filter.clone()).boxed());
    }

    let file_guard = match &options.local_path {
        Some(local_path) => {
            std::fs::create_dir_all(local_path).map_err(|e| {
                PrecedentError::Configuration(format!(
                    "Failed to create log directory {}: {}",
                    local_path.display(),
                    e
                ))
            })?;

            let file_appender = RollingFileAppender::new(Rotation::DAILY, local_path, "precedent.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(non_blocking)
                .with_filter(env_filter);

            layers.push(file_layer.boxed());
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| PrecedentError::Configuration(format!("Failed to initialize logging: {e}")))?;

    tracing::debug!(
        level = %log_level,
        json = options.json,
        local_path = ?options.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(PrecedentError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))),
    }
}
