use crate::{cli_input::CompareArgs, errors::CliError, files::read_schema_files, output::report};
use graphql_schema_diff::{
    Criticality, SchemaDocument, find_changes, group_by_criticality, report_breaking_changes,
    report_dangerous_changes, report_non_breaking_changes,
};
use std::io;

pub(crate) fn compare(args: CompareArgs) -> Result<i32, CliError> {
    if args.oldversion == args.newversion {
        return Err(CliError::SameSchemaPaths(args.oldversion));
    }

    let old = SchemaDocument::parse_files(read_schema_files(&args.oldversion)?)?;
    let new = SchemaDocument::parse_files(read_schema_files(&args.newversion)?)?;

    let changes = find_changes(&old, &new);
    tracing::debug!("found {} changes", changes.len());

    if changes.is_empty() {
        report::no_changes();
        return Ok(0);
    }

    let groups = group_by_criticality(&changes);
    let empty = Vec::new();
    let breaking = groups.get(&Criticality::Breaking).unwrap_or(&empty);
    let dangerous = groups.get(&Criticality::Dangerous).unwrap_or(&empty);
    let non_breaking = groups.get(&Criticality::NonBreaking).unwrap_or(&empty);

    let include_file_path = !args.exclude_print_filepath;
    let mut stdout = io::stdout().lock();

    let breaking_count = report_breaking_changes(breaking, include_file_path, &mut stdout)?;

    if !args.breaking_change_only {
        report_dangerous_changes(dangerous, include_file_path, &mut stdout)?;
        report_non_breaking_changes(non_breaking, include_file_path, &mut stdout)?;
    }

    drop(stdout);

    if breaking_count == 0 {
        report::no_breaking_changes();
        Ok(0)
    } else {
        report::breaking_change_count(breaking_count);
        Ok(1)
    }
}
