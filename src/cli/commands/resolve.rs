//! Resolve command implementation
//!
//! Builds a record from a declaration file, resolves it against the
//! environment, the environment file, and the flags given after `--`, and
//! prints the result.

use crate::config::{load_declarations, DynamicConfig, FieldValue};
use crate::domain::PrecedentError;
use crate::engine::{MissingFlagPolicy, PrecedenceEngine, ResolutionReport};
use crate::sources::{FlagContext, FlagPresence, DEFAULT_ENV_FILE};
use clap::{Args, ValueEnum};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::path::PathBuf;

/// Output format for resolved values
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Toml,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Declaration file describing the record
    #[arg(short, long, env = "PRECEDENT_DECLARATIONS")]
    pub declarations: PathBuf,

    /// Environment file to read
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Do not read an environment file
    #[arg(long, conflicts_with = "env_file")]
    pub no_env_file: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Print the source that produced each value
    #[arg(long)]
    pub explain: bool,

    /// Leave fields without a flag at their default instead of failing
    #[arg(long)]
    pub skip_unflagged: bool,

    /// Treat a flag equal to its default as not supplied
    #[arg(long)]
    pub legacy_flag_presence: bool,

    /// Flags for the declared record, given after `--`
    #[arg(last = true)]
    pub flags: Vec<String>,
}

impl ResolveArgs {
    /// Execute the resolve command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(declarations = %self.declarations.display(), "Resolving configuration");

        let declarations = match load_declarations(&self.declarations) {
            Ok(declarations) => declarations,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };

        let mut config = match DynamicConfig::from_declarations(&declarations) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };

        let mut flags = FlagContext::from_args(
            std::iter::once(env!("CARGO_PKG_NAME").to_string()).chain(self.flags.iter().cloned()),
        );

        let report = match self.engine().resolve(&mut config, &mut flags) {
            Ok(report) => report,
            Err(PrecedentError::FlagHelp(help)) => {
                print!("{help}");
                return Ok(0);
            }
            Err(e) => {
                tracing::error!(error = %e, "Resolution failed");
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };

        let output = if self.explain {
            self.render(&Explanation {
                config: &config,
                report: &report,
            })?
        } else {
            self.render(&config)?
        };
        println!("{}", output.trim_end());
        Ok(0)
    }

    fn engine(&self) -> PrecedenceEngine {
        let engine = if self.no_env_file {
            PrecedenceEngine::new().without_env_file()
        } else {
            PrecedenceEngine::new().with_env_file(&self.env_file)
        };

        let presence = if self.legacy_flag_presence {
            FlagPresence::DiffersFromDefault
        } else {
            FlagPresence::Explicit
        };

        let policy = if self.skip_unflagged {
            MissingFlagPolicy::Skip
        } else {
            MissingFlagPolicy::Reject
        };

        engine
            .with_flag_presence(presence)
            .with_missing_flag_policy(policy)
    }

    fn render<T: Serialize>(&self, value: &T) -> anyhow::Result<String> {
        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Toml => toml::to_string(value)?,
        };
        Ok(rendered)
    }
}

/// Resolved values paired with the source each came from
struct Explanation<'a> {
    config: &'a DynamicConfig,
    report: &'a ResolutionReport,
}

#[derive(Serialize)]
struct ExplainedField<'a> {
    value: &'a FieldValue,
    source: &'static str,
}

impl Serialize for Explanation<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.config.len()))?;
        for (name, value) in self.config.iter() {
            let source = self
                .report
                .source_of(name)
                .map_or("skipped", |source| source.as_str());
            map.serialize_entry(name, &ExplainedField { value, source })?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(declarations: PathBuf) -> ResolveArgs {
        ResolveArgs {
            declarations,
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            no_env_file: true,
            format: OutputFormat::Json,
            explain: false,
            skip_unflagged: false,
            legacy_flag_presence: false,
            flags: Vec::new(),
        }
    }

    #[test]
    fn test_engine_options_follow_args() {
        let mut resolve = args(PathBuf::from("fields.toml"));
        assert_eq!(resolve.engine().env_file(), None);

        resolve.no_env_file = false;
        resolve.env_file = PathBuf::from("local.env");
        assert_eq!(
            resolve.engine().env_file(),
            Some(std::path::Path::new("local.env"))
        );
    }

    #[test]
    fn test_missing_declarations_is_config_error() {
        let code = args(PathBuf::from("does-not-exist.toml")).execute().unwrap();
        assert_eq!(code, 2);
    }

    #[test]
    fn test_resolves_with_flags() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"[[field]]\nname = \"Port\"\ntype = \"int\"\nflag = \"port\"\ndefault = 9000\n",
        )
        .unwrap();
        file.flush().unwrap();

        let mut resolve = args(file.path().to_path_buf());
        resolve.flags = vec!["--port=4000".to_string()];
        assert_eq!(resolve.execute().unwrap(), 0);
    }

    #[test]
    fn test_explanation_marks_skipped_fields() {
        let declarations = crate::config::parse_declarations(
            "[[field]]\nname = \"Port\"\ntype = \"int\"\ndefault = 1\n",
        )
        .unwrap();
        let mut config = DynamicConfig::from_declarations(&declarations).unwrap();
        let report = PrecedenceEngine::new()
            .with_env(crate::sources::Env::from_vars(Vec::<(&str, &str)>::new()))
            .without_env_file()
            .with_missing_flag_policy(MissingFlagPolicy::Skip)
            .resolve(&mut config, &mut FlagContext::from_args(["p"]))
            .unwrap();

        let json = serde_json::to_string(&Explanation {
            config: &config,
            report: &report,
        })
        .unwrap();
        assert_eq!(json, r#"{"Port":{"value":1,"source":"skipped"}}"#);
    }
}
