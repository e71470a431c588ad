pub(crate) mod report {
    use crate::errors::CliError;
    use colored::Colorize;
    use graphql_schema_lint::Finding;

    /// reports an error to stderr
    pub(crate) fn error(error: &CliError) {
        eprintln!("{}", format!("Error: {error}").bright_red());
    }

    pub(crate) fn no_changes() {
        println!("No changes found on schema compare! 🎉");
    }

    pub(crate) fn no_breaking_changes() {
        println!("{}", "No breaking changes found 🎉".bright_green());
    }

    pub(crate) fn breaking_change_count(count: usize) {
        println!();
        println!("{}", format!("❌ Breaking changes in schema: {count}").bright_red());
    }

    /// one `file:line:column message` line per finding, a blank line after
    /// each file
    pub(crate) fn findings(file: &str, findings: &[Finding]) {
        for finding in findings {
            println!("{file}:{}:{} {}", finding.line, finding.column, finding.message);
        }
        println!();
    }

    pub(crate) fn no_lint_errors() {
        println!("{}", "Schema has no lint errors! 🎉".bright_green());
    }

    pub(crate) fn lint_error_count(count: usize) {
        println!("{}", format!("❌ Total lint errors found: {count}").bright_red());
    }
}
