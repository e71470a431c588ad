//! Style and specification linting of GraphQL schemas.
//!
//! ```
//! let findings = graphql_schema_lint::lint(
//!     "schema.graphql",
//!     "type Employee { name: String }",
//!     &["type-desc"],
//! )
//! .unwrap();
//!
//! assert_eq!(findings.len(), 1);
//! assert_eq!(findings[0].rule, "type-desc");
//! ```
//!
//! Passing no rules runs every registered rule. Findings can be suppressed
//! from inside the schema with `#lint-disable`, `#lint-enable` and
//! `#lint-disable-line` comments.

mod finding;
mod inline_config;
mod rules;

pub use finding::Finding;
pub use rules::{ALL_RULES, Rule, available_rules_with_description};

use inline_config::{extract_inline_lint_configs, filter_findings};

#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// The schema file is not valid GraphQL SDL.
    #[error("failed to parse '{file}': {source}")]
    Parse {
        file: String,
        source: async_graphql_parser::Error,
    },
    /// The caller selected a rule that is not in the registry.
    #[error("invalid rule '{name}' passed")]
    UnknownRule { name: String },
}

/// Lint one schema file with the selected rules; an empty selection means
/// every registered rule. Returns the findings that survive the schema's
/// inline suppression comments, sorted by position.
pub fn lint(file_name: &str, source: &str, rules: &[&str]) -> Result<Vec<Finding>, LintError> {
    let selected = resolve_rules(rules)?;

    let document = async_graphql_parser::parse_schema(source).map_err(|source| LintError::Parse {
        file: file_name.to_owned(),
        source,
    })?;

    let mut findings: Vec<Finding> = selected
        .iter()
        .flat_map(|rule| rule.run(&document))
        .collect();
    findings.sort_by_key(|finding| (finding.line, finding.column));

    let configs = extract_inline_lint_configs(source);

    Ok(filter_findings(findings, &configs))
}

fn resolve_rules(names: &[&str]) -> Result<Vec<&'static Rule>, LintError> {
    if names.is_empty() {
        return Ok(ALL_RULES.iter().collect());
    }

    names
        .iter()
        .map(|name| {
            ALL_RULES
                .iter()
                .find(|rule| rule.name.eq_ignore_ascii_case(name.trim()))
                .ok_or_else(|| LintError::UnknownRule {
                    name: (*name).to_owned(),
                })
        })
        .collect()
}
