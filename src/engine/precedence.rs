//! Precedence engine
//!
//! Applies override sources to every declared field in a fixed order:
//!
//! 1. Default (materialized when the field is declared)
//! 2. Environment variable
//! 3. Environment file
//! 4. Command-line flag (highest precedence)

use super::report::{ResolutionReport, Source};
use super::Configurable;
use crate::domain::{PrecedentError, Result};
use crate::field::{with_resolver, Field, FieldResolver, FieldType};
use crate::sources::flags::REMAINING_ID;
use crate::sources::{Env, EnvFile, FlagContext, FlagMatches, FlagPresence, DEFAULT_ENV_FILE};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Flag names the argument parser claims for itself
const RESERVED_FLAGS: [&str; 1] = ["help"];

/// What to do with a field that declares no flag name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingFlagPolicy {
    /// Abort the pass with [`PrecedentError::MissingFlagName`]
    #[default]
    Reject,
    /// Leave the field at its default and exclude it from resolution
    Skip,
}

/// Sources consulted for every field of one pass
struct Sources<'s> {
    env: &'s Env,
    env_file: &'s EnvFile,
    presence: FlagPresence,
}

/// Resolution options and entry point
///
/// # Examples
///
/// ```
/// use precedent::engine::{Configurable, PrecedenceEngine, Source};
/// use precedent::field::{FieldDecl, FieldSet};
/// use precedent::sources::{Env, FlagContext};
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
/// }
///
/// impl Configurable for Server {
///     fn fields(&mut self) -> FieldSet<'_> {
///         FieldSet::new().field(
///             &mut self.host,
///             FieldDecl::new("Host")
///                 .with_flag("host")
///                 .with_env("HOST")
///                 .with_default("localhost:8080"),
///         )
///     }
/// }
///
/// let engine = PrecedenceEngine::new()
///     .with_env(Env::from_vars([("HOST", "example.com:3000")]))
///     .without_env_file();
/// let mut flags = FlagContext::from_args(["server", "--host=flag.com:4000"]);
///
/// let mut server = Server::default();
/// let report = engine.resolve(&mut server, &mut flags).unwrap();
///
/// assert_eq!(server.host, "flag.com:4000");
/// assert_eq!(report.source_of("Host"), Some(Source::Flag));
/// ```
#[derive(Debug, Clone)]
pub struct PrecedenceEngine {
    env: Env,
    env_file: Option<PathBuf>,
    flag_presence: FlagPresence,
    missing_flag: MissingFlagPolicy,
}

impl Default for PrecedenceEngine {
    fn default() -> Self {
        Self {
            env: Env::process(),
            env_file: Some(PathBuf::from(DEFAULT_ENV_FILE)),
            flag_presence: FlagPresence::default(),
            missing_flag: MissingFlagPolicy::default(),
        }
    }
}

impl PrecedenceEngine {
    /// Process environment, `.env` in the working directory, explicit flag
    /// presence, and fields without flags rejected
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Disables the environment file source
    pub fn without_env_file(mut self) -> Self {
        self.env_file = None;
        self
    }

    pub fn with_flag_presence(mut self, presence: FlagPresence) -> Self {
        self.flag_presence = presence;
        self
    }

    pub fn with_missing_flag_policy(mut self, policy: MissingFlagPolicy) -> Self {
        self.missing_flag = policy;
        self
    }

    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Runs one resolution pass over every field `config` declares.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment file exists but cannot be read,
    /// if a field declaration is invalid, or if the command line does not
    /// parse. Values that fail to parse as their field's type are never
    /// errors; they are skipped in favour of the next lower source.
    pub fn resolve<C>(&self, config: &mut C, flags: &mut FlagContext) -> Result<ResolutionReport>
    where
        C: Configurable + ?Sized,
    {
        let env_file = match &self.env_file {
            Some(path) => EnvFile::load(path)?,
            None => EnvFile::default(),
        };

        let mut report = ResolutionReport::default();
        let mut fields = Vec::new();
        for field in config.fields() {
            if field.decl().flag().is_some() {
                fields.push(field);
                continue;
            }
            match self.missing_flag {
                MissingFlagPolicy::Reject => {
                    return Err(PrecedentError::MissingFlagName(field.decl().name().to_string()))
                }
                MissingFlagPolicy::Skip => {
                    tracing::warn!(
                        field = %field.decl().name(),
                        "Field has no flag name, excluding it from resolution"
                    );
                    report.skip(field.decl().name());
                }
            }
        }
        check_flag_names(&fields)?;

        let specs: Vec<_> = fields.iter().filter_map(Field::flag_spec).collect();
        let matches = flags.register(&specs)?;

        let sources = Sources {
            env: &self.env,
            env_file: &env_file,
            presence: self.flag_presence,
        };

        for mut field in fields {
            bind_flag(&mut field, matches);
            let source = with_resolver!(&mut field, resolver => apply_with_precedence(resolver, &sources));
            tracing::debug!(
                field = %field.decl().name(),
                kind = %field.kind(),
                source = %source,
                "Resolved field"
            );
            report.record(field.decl().name(), source);
        }

        tracing::info!(
            fields = report.fields.len(),
            skipped = report.skipped.len(),
            from_flags = report.count(Source::Flag),
            from_env_file = report.count(Source::EnvFile),
            from_environment = report.count(Source::Environment),
            "Configuration resolved"
        );

        Ok(report)
    }
}

/// Whether `flag` can be registered as `--flag` and supplied on a command line
fn is_valid_flag_name(flag: &str) -> bool {
    !flag.starts_with('-')
        && !flag.contains('=')
        && !flag.chars().any(char::is_whitespace)
        && flag != REMAINING_ID
}

/// Rejects malformed, duplicate and reserved flag names
fn check_flag_names(fields: &[Field<'_>]) -> Result<()> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    for field in fields {
        let decl = field.decl();
        let Some(flag) = decl.flag() else {
            continue;
        };
        if !is_valid_flag_name(flag) {
            return Err(PrecedentError::InvalidFlagName {
                flag: flag.to_string(),
                field: decl.name().to_string(),
            });
        }
        if RESERVED_FLAGS.contains(&flag) {
            return Err(PrecedentError::ReservedFlag {
                flag: flag.to_string(),
                field: decl.name().to_string(),
            });
        }
        if let Some(first) = owners.insert(flag, decl.name()) {
            return Err(PrecedentError::DuplicateFlag {
                flag: flag.to_string(),
                first: first.to_string(),
                second: decl.name().to_string(),
            });
        }
    }
    Ok(())
}

fn bind_flag(field: &mut Field<'_>, matches: &FlagMatches) {
    let raw = field
        .decl()
        .flag()
        .and_then(|flag| matches.get(flag))
        .map(str::to_string);
    field.bind_flag(raw);
}

/// Overrides the default with each present source in ascending precedence
fn apply_with_precedence<T: FieldType>(resolver: &mut FieldResolver<'_, T>, sources: &Sources<'_>) -> Source {
    let mut source = Source::Default;

    if let Some(value) = resolver.env_value(sources.env) {
        resolver.set_value(value);
        source = Source::Environment;
    }

    if let Some(value) = resolver.env_file_value(sources.env_file) {
        resolver.set_value(value);
        source = Source::EnvFile;
    }

    if let Some(value) = resolver.flag_value(sources.presence) {
        resolver.set_value(value);
        source = Source::Flag;
    }

    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDecl, FieldSet};
    use test_case::test_case;

    #[derive(Debug, Default)]
    struct Limits {
        retries: i64,
        ratio: f64,
    }

    impl Configurable for Limits {
        fn fields(&mut self) -> FieldSet<'_> {
            FieldSet::new()
                .field(
                    &mut self.retries,
                    FieldDecl::new("Retries")
                        .with_flag("retries")
                        .with_env("RETRIES")
                        .with_default("3"),
                )
                .field(
                    &mut self.ratio,
                    FieldDecl::new("Ratio")
                        .with_flag("ratio")
                        .with_env("RATIO")
                        .with_default("0.25"),
                )
        }
    }

    fn engine(env: Env) -> PrecedenceEngine {
        PrecedenceEngine::new().with_env(env).without_env_file()
    }

    #[test]
    fn test_defaults_only() {
        let mut limits = Limits::default();
        let mut flags = FlagContext::from_args(["limits"]);
        let report = engine(Env::from_vars(Vec::<(&str, &str)>::new()))
            .resolve(&mut limits, &mut flags)
            .unwrap();

        assert_eq!(limits.retries, 3);
        assert_eq!(limits.ratio, 0.25);
        assert_eq!(report.count(Source::Default), 2);
    }

    #[test]
    fn test_each_field_resolved_independently() {
        let mut limits = Limits::default();
        let mut flags = FlagContext::from_args(["limits", "--ratio=0.5"]);
        let report = engine(Env::from_vars([("RETRIES", "5")]))
            .resolve(&mut limits, &mut flags)
            .unwrap();

        assert_eq!(limits.retries, 5);
        assert_eq!(limits.ratio, 0.5);
        assert_eq!(report.source_of("Retries"), Some(Source::Environment));
        assert_eq!(report.source_of("Ratio"), Some(Source::Flag));
    }

    #[test]
    fn test_apply_with_precedence_falls_through_malformed_sources() {
        let mut retries = 0_i64;
        let decl = FieldDecl::new("Retries")
            .with_flag("retries")
            .with_env("RETRIES")
            .with_default("3");
        let mut resolver = FieldResolver::new(&mut retries, decl);
        resolver.bind_flag(Some("lots".to_string()));

        let env = Env::from_vars([("RETRIES", "7")]);
        let env_file = EnvFile::from_pairs([("RETRIES", "seven")]);
        let sources = Sources {
            env: &env,
            env_file: &env_file,
            presence: FlagPresence::Explicit,
        };

        assert_eq!(apply_with_precedence(&mut resolver, &sources), Source::Environment);
        assert_eq!(*resolver.value(), 7);
    }

    #[test]
    fn test_duplicate_flag_names_rejected() {
        let mut a = String::new();
        let mut b = String::new();
        let fields: Vec<Field<'_>> = FieldSet::new()
            .field(&mut a, FieldDecl::new("A").with_flag("name"))
            .field(&mut b, FieldDecl::new("B").with_flag("name"))
            .into_iter()
            .collect();

        let err = check_flag_names(&fields).unwrap_err();
        assert!(matches!(err, PrecedentError::DuplicateFlag { ref first, ref second, .. }
            if first == "A" && second == "B"));
    }

    #[test]
    fn test_reserved_flag_name_rejected() {
        let mut a = false;
        let fields: Vec<Field<'_>> = FieldSet::new()
            .field(&mut a, FieldDecl::new("Help").with_flag("help"))
            .into_iter()
            .collect();

        let err = check_flag_names(&fields).unwrap_err();
        assert!(matches!(err, PrecedentError::ReservedFlag { .. }));
    }

    #[test_case("--port" ; "leading dashes")]
    #[test_case("-p" ; "single leading dash")]
    #[test_case("a=b" ; "equals sign")]
    #[test_case("my port" ; "space")]
    #[test_case("tab\tname" ; "tab")]
    #[test_case("__remaining" ; "internal positional id")]
    fn test_invalid_flag_names_rejected(flag: &str) {
        let mut port = 0_i64;
        let fields: Vec<Field<'_>> = FieldSet::new()
            .field(&mut port, FieldDecl::new("Port").with_flag(flag))
            .into_iter()
            .collect();

        let err = check_flag_names(&fields).unwrap_err();
        assert!(matches!(err, PrecedentError::InvalidFlagName { flag: ref f, ref field }
            if f == flag && field == "Port"));
    }

    #[test]
    fn test_invalid_flag_name_fails_resolution_without_panic() {
        struct Odd {
            port: i64,
        }

        impl Configurable for Odd {
            fn fields(&mut self) -> FieldSet<'_> {
                FieldSet::new().field(
                    &mut self.port,
                    FieldDecl::new("Port").with_flag("--port").with_default("9000"),
                )
            }
        }

        let mut odd = Odd { port: 0 };
        let mut flags = FlagContext::from_args(["odd"]);
        let result = engine(Env::from_vars(Vec::<(&str, &str)>::new())).resolve(&mut odd, &mut flags);

        assert!(matches!(result, Err(PrecedentError::InvalidFlagName { .. })));
        assert!(!flags.is_registered());
    }

    #[test]
    fn test_dashed_and_dotted_names_are_valid() {
        assert!(is_valid_flag_name("start-time"));
        assert!(is_valid_flag_name("log.level"));
        assert!(is_valid_flag_name("port_2"));
    }
}
