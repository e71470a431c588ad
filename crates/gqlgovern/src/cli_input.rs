use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "gqlgovern", version)]
/// Governance checks for federated GraphQL schemas
pub(crate) struct Args {
    #[command(subcommand)]
    pub(crate) command: Command,
    /// Log filter passed to tracing, e.g. 'info' or 'gqlgovern=debug'
    #[arg(long = "log", env = "GQLGOVERN_LOG", default_value = "warn", global = true)]
    pub(crate) log_level: String,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Compare two versions of a GraphQL schema and classify every change
    Compare(CompareArgs),
    /// Lint a GraphQL schema against the registered rules
    Lint(LintArgs),
}

#[derive(Debug, clap::Args)]
pub(crate) struct CompareArgs {
    /// Path or glob of the old version of the schema
    #[arg(short, long)]
    pub(crate) oldversion: String,
    /// Path or glob of the new version of the schema
    #[arg(short, long)]
    pub(crate) newversion: String,
    /// Report breaking changes only
    #[arg(short, long)]
    pub(crate) breaking_change_only: bool,
    /// Leave the file:line prefix out of the report lines
    #[arg(short, long)]
    pub(crate) exclude_print_filepath: bool,
}

#[derive(Debug, clap::Args)]
pub(crate) struct LintArgs {
    /// Path or glob of the schema files to lint
    #[arg(short, long)]
    pub(crate) filepath: String,
    /// Rules to apply, e.g. -r type-desc,field-desc. Applies every rule
    /// when left out.
    #[arg(short, long, value_delimiter = ',', long_help = rules_long_help())]
    pub(crate) rules: Vec<String>,
}

fn rules_long_help() -> String {
    format!(
        "Rules you want the linter to use, e.g. -r type-desc,field-desc; available rules:\n{}",
        graphql_schema_lint::available_rules_with_description()
    )
}
