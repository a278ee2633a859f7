//! Domain error types
//!
//! This module defines the error hierarchy for Precedent.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Precedent error type
///
/// Every fatal condition of a resolution pass maps to one of these variants.
/// Parse failures of individual source values are not errors: they degrade
/// to absence inside the field resolver.
#[derive(Debug, Error)]
pub enum PrecedentError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Environment file exists but could not be read or parsed
    #[error("Environment file error: {path}: {message}")]
    EnvFile { path: String, message: String },

    /// The declared target does not describe a record of fields
    #[error("Not a configuration record: {0}")]
    NotARecord(String),

    /// A field was declared without a flag name
    #[error("Field '{0}' has no flag name")]
    MissingFlagName(String),

    /// A field declared a type outside the supported set
    #[error("Field '{field}' has unsupported type: {type_name}")]
    UnsupportedType { field: String, type_name: String },

    /// Two fields registered the same flag name
    #[error("Flag '--{flag}' is declared by both '{first}' and '{second}'")]
    DuplicateFlag {
        flag: String,
        first: String,
        second: String,
    },

    /// A field tried to claim a flag name owned by the argument parser
    #[error("Flag '--{flag}' declared by '{field}' is reserved")]
    ReservedFlag { flag: String, field: String },

    /// A flag name the command line can never supply
    #[error("Flag name '{flag}' declared by '{field}' is invalid: names cannot start with '-' or contain '=' or whitespace")]
    InvalidFlagName { flag: String, field: String },

    /// Command-line arguments could not be parsed
    #[error("Flag parse error: {0}")]
    Flags(String),

    /// Help was requested on the command line; carries the rendered text
    #[error("{0}")]
    FlagHelp(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl PrecedentError {
    /// Whether the error was caused by how fields were declared, as opposed
    /// to the environment the pass ran in
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            PrecedentError::NotARecord(_)
                | PrecedentError::MissingFlagName(_)
                | PrecedentError::UnsupportedType { .. }
                | PrecedentError::DuplicateFlag { .. }
                | PrecedentError::ReservedFlag { .. }
                | PrecedentError::InvalidFlagName { .. }
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PrecedentError {
    fn from(err: std::io::Error) -> Self {
        PrecedentError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PrecedentError {
    fn from(err: serde_json::Error) -> Self {
        PrecedentError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PrecedentError {
    fn from(err: toml::de::Error) -> Self {
        PrecedentError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from toml serialization errors
impl From<toml::ser::Error> for PrecedentError {
    fn from(err: toml::ser::Error) -> Self {
        PrecedentError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedent_error_display() {
        let err = PrecedentError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_unsupported_type_names_offender() {
        let err = PrecedentError::UnsupportedType {
            field: "Ratio".to_string(),
            type_name: "complex128".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Field 'Ratio' has unsupported type: complex128"
        );
    }

    #[test]
    fn test_duplicate_flag_display() {
        let err = PrecedentError::DuplicateFlag {
            flag: "port".to_string(),
            first: "Port".to_string(),
            second: "AdminPort".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Flag '--port' is declared by both 'Port' and 'AdminPort'"
        );
    }

    #[test]
    fn test_declaration_error_classification() {
        assert!(PrecedentError::MissingFlagName("Host".to_string()).is_declaration_error());
        assert!(PrecedentError::NotARecord("empty".to_string()).is_declaration_error());
        assert!(!PrecedentError::Flags("bad".to_string()).is_declaration_error());
        assert!(PrecedentError::InvalidFlagName {
            flag: "--port".to_string(),
            field: "Port".to_string(),
        }
        .is_declaration_error());
        assert!(!PrecedentError::EnvFile {
            path: ".env".to_string(),
            message: "denied".to_string(),
        }
        .is_declaration_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: PrecedentError = io_err.into();
        assert!(matches!(err, PrecedentError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: PrecedentError = json_err.into();
        assert!(matches!(err, PrecedentError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: PrecedentError = toml_err.into();
        assert!(matches!(err, PrecedentError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_precedent_error_implements_std_error() {
        let err = PrecedentError::Flags("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
