//! Declaration file loader

use super::schema::{DeclarationFile, FieldDeclaration};
use crate::domain::{PrecedentError, Result};
use std::fs;
use std::path::Path;

/// Loads field declarations from a TOML file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be found or read
/// - TOML parsing fails
/// - The file does not describe a record (no `[[field]]` tables)
///
/// # Examples
///
/// ```no_run
/// use precedent::config::load_declarations;
///
/// let declarations = load_declarations("fields.toml").expect("Failed to load declarations");
/// ```
pub fn load_declarations(path: impl AsRef<Path>) -> Result<Vec<FieldDeclaration>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PrecedentError::Configuration(format!(
            "Declaration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PrecedentError::Configuration(format!(
            "Failed to read declaration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let declarations = parse_declarations(&contents)?;
    tracing::debug!(
        path = %path.display(),
        fields = declarations.len(),
        "Loaded field declarations"
    );
    Ok(declarations)
}

/// Parses field declarations from TOML text
///
/// # Errors
///
/// Returns [`PrecedentError::NotARecord`] when the document has no
/// `[[field]]` tables, or `field` is not an array of tables.
pub fn parse_declarations(contents: &str) -> Result<Vec<FieldDeclaration>> {
    let table: toml::Table = toml::from_str(contents)?;

    match table.get("field") {
        Some(toml::Value::Array(items)) if !items.is_empty() && items.iter().all(toml::Value::is_table) => {}
        Some(other) => {
            return Err(PrecedentError::NotARecord(format!(
                "`field` must be an array of tables, found {}",
                other.type_str()
            )))
        }
        None => {
            return Err(PrecedentError::NotARecord(
                "no [[field]] tables declared".to_string(),
            ))
        }
    }

    let file: DeclarationFile = toml::Value::Table(table).try_into()?;
    Ok(file.fields)
}
