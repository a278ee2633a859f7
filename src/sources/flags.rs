//! Command-line flag registration and parsing
//!
//! Flags are registered with `clap` once per [`FlagContext`]. Every flag is
//! registered as a plain string so that type parsing, and its silent
//! fallback, stays with the field resolvers.

use crate::domain::{PrecedentError, Result};
use crate::field::FieldKind;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command};
use std::collections::HashMap;

/// Id of the hidden positional that collects arguments after the flags
pub(crate) const REMAINING_ID: &str = "__remaining";

/// How a field decides that its flag was supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagPresence {
    /// Present whenever the flag appears on the command line
    #[default]
    Explicit,
    /// Present only when the supplied value differs from the field's default.
    /// Supplying the default value explicitly is indistinguishable from not
    /// supplying the flag.
    DiffersFromDefault,
}

/// Registration data for one flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: String,
    pub kind: FieldKind,
    pub default: String,
    pub description: String,
}

impl FlagSpec {
    fn to_arg(&self) -> Arg {
        let mut help = self.description.clone();
        if !self.default.is_empty() {
            if !help.is_empty() {
                help.push(' ');
            }
            help.push_str(&format!("[default: {}]", self.default));
        }

        let arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .value_name(self.kind.value_name())
            .help(help)
            .action(ArgAction::Set);

        match self.kind {
            FieldKind::Bool => arg
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true"),
            FieldKind::Int | FieldKind::Float64 => arg.allow_negative_numbers(true),
            FieldKind::String | FieldKind::Timestamp => arg.allow_hyphen_values(true),
        }
    }
}

/// Raw flag values captured from one parse of the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagMatches {
    values: HashMap<String, String>,
    remaining: Vec<String>,
}

impl FlagMatches {
    /// Raw value supplied for `name`, `None` when the flag was not given
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Positional arguments following the flags
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Initialization context that owns the one-time flag registration gate
///
/// The first resolution pass registers every declared flag and parses the
/// arguments; later passes on the same context skip registration and reuse
/// the captured values. The gate is a plain check-then-act, which `&mut`
/// access makes safe for a single initialization path.
#[derive(Debug, Clone)]
pub struct FlagContext {
    program: String,
    args: Vec<String>,
    matches: Option<FlagMatches>,
}

impl FlagContext {
    /// Uses the process arguments
    pub fn from_env() -> Self {
        Self::from_args(std::env::args())
    }

    /// Uses `args`, where the first item is the program name
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let program = args.next().unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
        Self {
            program,
            args: args.collect(),
            matches: None,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether flags have already been registered and parsed
    pub fn is_registered(&self) -> bool {
        self.matches.is_some()
    }

    /// Values captured by the registration pass, if it happened
    pub fn matches(&self) -> Option<&FlagMatches> {
        self.matches.as_ref()
    }

    /// Registers `specs` and parses the arguments, once.
    ///
    /// # Errors
    ///
    /// Returns [`PrecedentError::FlagHelp`] when help was requested and
    /// [`PrecedentError::Flags`] when the arguments do not parse.
    pub fn register(&mut self, specs: &[FlagSpec]) -> Result<&FlagMatches> {
        if self.matches.is_some() {
            tracing::debug!(
                flags = specs.len(),
                "Flags already registered, reusing parsed values"
            );
        } else {
            let matches = self.parse(specs)?;
            tracing::debug!(
                registered = specs.len(),
                supplied = matches.len(),
                "Parsed command-line flags"
            );
            self.matches = Some(matches);
        }
        Ok(self.matches.get_or_insert_with(FlagMatches::default))
    }

    fn parse(&self, specs: &[FlagSpec]) -> Result<FlagMatches> {
        let command = specs.iter().fold(
            Command::new(self.program.clone())
                .disable_version_flag(true)
                .args_override_self(true),
            |command, spec| command.arg(spec.to_arg()),
        );
        let command = command.arg(
            Arg::new(REMAINING_ID)
                .num_args(1..)
                .trailing_var_arg(true)
                .hide(true)
                .action(ArgAction::Append),
        );

        let argv = std::iter::once(self.program.clone())
            .chain(normalize_single_dash(&self.args, specs));

        let parsed = command.try_get_matches_from(argv).map_err(|e| match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                PrecedentError::FlagHelp(e.render().to_string())
            }
            _ => PrecedentError::Flags(e.render().to_string()),
        })?;

        let values = specs
            .iter()
            .filter_map(|spec| {
                parsed
                    .get_one::<String>(&spec.name)
                    .map(|value| (spec.name.clone(), value.clone()))
            })
            .collect();
        let remaining = parsed
            .get_many::<String>(REMAINING_ID)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        Ok(FlagMatches { values, remaining })
    }
}

impl Default for FlagContext {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Rewrites `-name` and `-name=value` into their `--` form for declared flags.
///
/// Scanning stops at `--`.
fn normalize_single_dash(args: &[String], specs: &[FlagSpec]) -> Vec<String> {
    let mut normalized = Vec::with_capacity(args.len());
    let mut flags_done = false;

    for arg in args {
        if flags_done || arg == "--" {
            flags_done = true;
            normalized.push(arg.clone());
            continue;
        }

        let rewritten = arg
            .strip_prefix('-')
            .filter(|rest| !rest.starts_with('-'))
            .filter(|rest| {
                let name = rest.split_once('=').map_or(*rest, |(name, _)| name);
                specs.iter().any(|spec| spec.name == name)
            })
            .map(|rest| format!("--{rest}"));

        normalized.push(rewritten.unwrap_or_else(|| arg.clone()));
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, kind: FieldKind, default: &str) -> FlagSpec {
        FlagSpec {
            name: name.to_string(),
            kind,
            default: default.to_string(),
            description: format!("{name} flag"),
        }
    }

    fn specs() -> Vec<FlagSpec> {
        vec![
            spec("host", FieldKind::String, "localhost:8080"),
            spec("port", FieldKind::Int, "9000"),
            spec("debug", FieldKind::Bool, "false"),
            spec("timeout", FieldKind::Float64, "30.5"),
        ]
    }

    #[test]
    fn test_no_args_yields_no_values() {
        let mut ctx = FlagContext::from_args(["prog"]);
        let matches = ctx.register(&specs()).unwrap();
        assert!(matches.is_empty());
        assert!(ctx.is_registered());
    }

    #[test]
    fn test_double_dash_flags() {
        let mut ctx = FlagContext::from_args(["prog", "--host=flag.com:4000", "--port", "4000"]);
        let matches = ctx.register(&specs()).unwrap();
        assert_eq!(matches.get("host"), Some("flag.com:4000"));
        assert_eq!(matches.get("port"), Some("4000"));
        assert_eq!(matches.get("debug"), None);
    }

    #[test]
    fn test_single_dash_long_flags() {
        let mut ctx = FlagContext::from_args(["prog", "-host=flag.com:4000", "-port", "12"]);
        let matches = ctx.register(&specs()).unwrap();
        assert_eq!(matches.get("host"), Some("flag.com:4000"));
        assert_eq!(matches.get("port"), Some("12"));
    }

    #[test]
    fn test_bare_bool_flag_means_true() {
        let mut ctx = FlagContext::from_args(["prog", "--debug"]);
        let matches = ctx.register(&specs()).unwrap();
        assert_eq!(matches.get("debug"), Some("true"));
    }

    #[test]
    fn test_bool_flag_with_value() {
        let mut ctx = FlagContext::from_args(["prog", "--debug=false"]);
        let matches = ctx.register(&specs()).unwrap();
        assert_eq!(matches.get("debug"), Some("false"));
    }

    #[test]
    fn test_negative_numbers() {
        let mut ctx = FlagContext::from_args(["prog", "--port", "-5", "--timeout", "-0.5"]);
        let matches = ctx.register(&specs()).unwrap();
        assert_eq!(matches.get("port"), Some("-5"));
        assert_eq!(matches.get("timeout"), Some("-0.5"));
    }

    #[test]
    fn test_string_flag_takes_hyphenated_value() {
        let mut ctx = FlagContext::from_args(["prog", "--host", "-x"]);
        let matches = ctx.register(&specs()).unwrap();
        assert_eq!(matches.get("host"), Some("-x"));
    }

    #[test]
    fn test_repeated_flag_last_wins() {
        let mut ctx = FlagContext::from_args(["prog", "--port=1", "--port=2"]);
        let matches = ctx.register(&specs()).unwrap();
        assert_eq!(matches.get("port"), Some("2"));
    }

    #[test]
    fn test_malformed_values_are_captured_raw() {
        let mut ctx = FlagContext::from_args(["prog", "--port=many"]);
        let matches = ctx.register(&specs()).unwrap();
        assert_eq!(matches.get("port"), Some("many"));
    }

    #[test]
    fn test_remaining_positionals() {
        let mut ctx = FlagContext::from_args(["prog", "--port=1", "serve", "--fast"]);
        let matches = ctx.register(&specs()).unwrap();
        assert_eq!(matches.get("port"), Some("1"));
        assert_eq!(matches.remaining(), ["serve", "--fast"]);
    }

    #[test]
    fn test_unknown_flag_is_error() {
        let mut ctx = FlagContext::from_args(["prog", "--colour=blue"]);
        let result = ctx.register(&specs());
        assert!(matches!(result, Err(PrecedentError::Flags(_))));
        assert!(!ctx.is_registered());
    }

    #[test]
    fn test_help_is_rendered() {
        let mut ctx = FlagContext::from_args(["prog", "--help"]);
        match ctx.register(&specs()) {
            Err(PrecedentError::FlagHelp(text)) => {
                assert!(text.contains("--host"));
                assert!(text.contains("[default: localhost:8080]"));
            }
            other => panic!("expected help, got {other:?}"),
        }
    }

    #[test]
    fn test_second_registration_reuses_values() {
        let mut ctx = FlagContext::from_args(["prog", "--port=4000"]);
        ctx.register(&specs()).unwrap();

        // A different flag set would fail to parse `--port`; reuse means it is never parsed
        let matches = ctx.register(&[spec("host", FieldKind::String, "")]).unwrap();
        assert_eq!(matches.get("port"), Some("4000"));
    }

    #[test]
    fn test_normalize_leaves_unknown_and_short_flags() {
        let args: Vec<String> = ["-h", "-verbose", "-host=x", "--", "-port=1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let normalized = normalize_single_dash(&args, &specs());
        assert_eq!(normalized, ["-h", "-verbose", "--host=x", "--", "-port=1"]);
    }

    #[test]
    fn test_program_name_defaults_to_package() {
        let ctx = FlagContext::from_args(Vec::<String>::new());
        assert_eq!(ctx.program(), "precedent");
    }
}
