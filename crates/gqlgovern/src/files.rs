use crate::errors::CliError;
use std::fs;

/// Read every schema file matching the pattern, as (path, contents) pairs
/// in glob order. An empty match set is an error.
pub(crate) fn read_schema_files(pattern: &str) -> Result<Vec<(String, String)>, CliError> {
    let entries = glob::glob(pattern).map_err(|source| CliError::InvalidPattern {
        path: pattern.to_owned(),
        source,
    })?;

    let mut files = Vec::new();

    for entry in entries {
        let path = entry?;

        if path.is_dir() {
            continue;
        }

        let contents = fs::read_to_string(&path).map_err(|source| CliError::ReadSchemaFile {
            path: path.display().to_string(),
            source,
        })?;

        if contents.is_empty() {
            tracing::warn!("empty schema file {}", path.display());
        }

        files.push((path.display().to_string(), contents));
    }

    if files.is_empty() {
        return Err(CliError::NoSchemaFiles {
            path: pattern.to_owned(),
        });
    }

    Ok(files)
}
