//! Diffing of federated GraphQL schemas for change management.
//!
//! Compare two versions of a schema and get back every observable
//! difference, classified by how it affects existing clients:
//!
//! ```
//! use graphql_schema_diff::{SchemaDocument, find_changes};
//!
//! let old = SchemaDocument::parse("old.graphql", "type Query { hello: String }").unwrap();
//! let new = SchemaDocument::parse("new.graphql", "type Query { hello: String! }").unwrap();
//!
//! let changes = find_changes(&old, &new);
//!
//! assert_eq!(changes.len(), 1);
//! ```

mod change;
mod compat;
mod directives;
mod report;
mod state;
mod traverse;
mod type_definitions;

pub use change::{Change, ChangeKind, Criticality, SourcePosition};
pub use report::{
    group_by_criticality, report_breaking_changes, report_dangerous_changes,
    report_non_breaking_changes,
};

use async_graphql_parser::types::{ServiceDocument, TypeSystemDefinition};

/// A parsed schema, possibly spread over several SDL files. Definitions
/// remember the file they came from so that changes can point into it.
#[derive(Debug)]
pub struct SchemaDocument {
    files: Vec<SourceFile>,
}

#[derive(Debug)]
struct SourceFile {
    name: String,
    document: ServiceDocument,
}

impl SchemaDocument {
    /// Parse a single SDL file.
    pub fn parse(name: impl Into<String>, sdl: &str) -> Result<Self, ParseError> {
        let name = name.into();
        let document = async_graphql_parser::parse_schema(sdl)
            .map_err(|source| ParseError { file: name.clone(), source })?;

        Ok(SchemaDocument {
            files: vec![SourceFile { name, document }],
        })
    }

    /// Parse a schema spread over several files, in the given order. The
    /// first failing file aborts the whole parse.
    pub fn parse_files<I>(files: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let files = files
            .into_iter()
            .map(|(name, sdl)| {
                let document = async_graphql_parser::parse_schema(&sdl)
                    .map_err(|source| ParseError { file: name.clone(), source })?;
                Ok(SourceFile { name, document })
            })
            .collect::<Result<_, _>>()?;

        Ok(SchemaDocument { files })
    }

    pub(crate) fn iter_definitions(&self) -> impl Iterator<Item = (&str, &TypeSystemDefinition)> {
        self.files.iter().flat_map(|file| {
            file.document
                .definitions
                .iter()
                .map(move |definition| (file.name.as_str(), definition))
        })
    }

    pub(crate) fn definition_count(&self) -> usize {
        self.files.iter().map(|file| file.document.definitions.len()).sum()
    }
}

/// The schema text of one of the input files was not valid GraphQL SDL.
#[derive(Debug, thiserror::Error)]
#[error("failed to parse '{file}': {source}")]
pub struct ParseError {
    file: String,
    source: async_graphql_parser::Error,
}

impl ParseError {
    /// The file the parser rejected.
    pub fn file(&self) -> &str {
        &self.file
    }
}

/// Compare two schemas and list every difference, ordered by source
/// position.
pub fn find_changes<'a>(old: &'a SchemaDocument, new: &'a SchemaDocument) -> Vec<Change<'a>> {
    let mut state = state::DiffState::default();
    traverse::traverse_documents([old, new], &mut state);
    state.into_changes()
}
