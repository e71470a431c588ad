use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("invalid glob pattern '{path}': {source}")]
    InvalidPattern {
        path: String,
        source: glob::PatternError,
    },
    #[error("no schema files match '{path}'")]
    NoSchemaFiles { path: String },
    #[error("could not read schema file '{path}': {source}")]
    ReadSchemaFile {
        path: String,
        source: std::io::Error,
    },
    #[error("old and new schema paths are both '{0}'")]
    SameSchemaPaths(String),
    #[error(transparent)]
    Glob(#[from] glob::GlobError),
    #[error(transparent)]
    Parse(#[from] graphql_schema_diff::ParseError),
    #[error(transparent)]
    Lint(#[from] graphql_schema_lint::LintError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
