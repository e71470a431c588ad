use crate::{cli_input::LintArgs, errors::CliError, files::read_schema_files, output::report};

pub(crate) fn lint(args: LintArgs) -> Result<i32, CliError> {
    let rules: Vec<&str> = args.rules.iter().map(String::as_str).collect();
    let files = read_schema_files(&args.filepath)?;

    let mut total = 0;

    for (name, contents) in &files {
        let findings = graphql_schema_lint::lint(name, contents, &rules)?;
        tracing::debug!("{name}: {} findings", findings.len());

        if findings.is_empty() {
            continue;
        }

        total += findings.len();
        report::findings(name, &findings);
    }

    if total == 0 {
        report::no_lint_errors();
        Ok(0)
    } else {
        report::lint_error_count(total);
        Ok(1)
    }
}
