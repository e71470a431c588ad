//! Grouping and rendering of classified changes.

use crate::{Change, Criticality};
use std::{collections::HashMap, io};

/// Bucket changes by their criticality. Buckets with no changes are absent
/// from the map.
pub fn group_by_criticality<'a, 'c>(
    changes: &'c [Change<'a>],
) -> HashMap<Criticality, Vec<&'c Change<'a>>> {
    let mut groups: HashMap<Criticality, Vec<&Change<'_>>> = HashMap::new();

    for change in changes {
        groups.entry(change.criticality).or_default().push(change);
    }

    groups
}

/// Print one line per breaking change, sorted by source position. Returns
/// the number of lines written.
pub fn report_breaking_changes(
    changes: &[&Change<'_>],
    include_file_path: bool,
    out: &mut dyn io::Write,
) -> io::Result<usize> {
    report_changes(changes, Criticality::Breaking.marker(), include_file_path, out)
}

/// Print one line per dangerous change, sorted by source position. Returns
/// the number of lines written.
pub fn report_dangerous_changes(
    changes: &[&Change<'_>],
    include_file_path: bool,
    out: &mut dyn io::Write,
) -> io::Result<usize> {
    report_changes(changes, Criticality::Dangerous.marker(), include_file_path, out)
}

/// Print one line per non-breaking change, sorted by source position.
/// Returns the number of lines written.
pub fn report_non_breaking_changes(
    changes: &[&Change<'_>],
    include_file_path: bool,
    out: &mut dyn io::Write,
) -> io::Result<usize> {
    report_changes(changes, Criticality::NonBreaking.marker(), include_file_path, out)
}

fn report_changes(
    changes: &[&Change<'_>],
    marker: &str,
    include_file_path: bool,
    out: &mut dyn io::Write,
) -> io::Result<usize> {
    let mut sorted = changes.to_vec();
    sorted.sort_by(|a, b| {
        (a.position.file, a.position.line).cmp(&(b.position.file, b.position.line))
    });

    for change in &sorted {
        if include_file_path {
            writeln!(
                out,
                "{marker}  {}:{} {}",
                change.position.file, change.position.line, change.message
            )?;
        } else {
            writeln!(out, "{marker}  {}", change.message)?;
        }
    }

    Ok(sorted.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChangeKind, SourcePosition};

    fn change(file: &'static str, line: usize, message: &str) -> Change<'static> {
        Change {
            kind: ChangeKind::FieldRemoved,
            criticality: Criticality::Breaking,
            message: message.to_owned(),
            path: String::new(),
            position: SourcePosition {
                file,
                line,
                column: 1,
            },
        }
    }

    #[test]
    fn report_orders_by_file_then_line() {
        let changes = [
            change("b.graphql", 1, "third"),
            change("a.graphql", 9, "second"),
            change("a.graphql", 2, "first"),
        ];
        let refs: Vec<&Change<'_>> = changes.iter().collect();

        let mut out = Vec::new();
        let count = report_breaking_changes(&refs, true, &mut out).unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "❌  a.graphql:2 first\n❌  a.graphql:9 second\n❌  b.graphql:1 third\n"
        );
    }

    #[test]
    fn report_without_file_path() {
        let changes = [change("a.graphql", 1, "only")];
        let refs: Vec<&Change<'_>> = changes.iter().collect();

        let mut out = Vec::new();
        report_non_breaking_changes(&refs, false, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "✅  only\n");
    }
}
