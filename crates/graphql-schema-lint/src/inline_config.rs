//! Inline suppression of lint findings. Schemas can carry `#lint-*`
//! comments that disable or re-enable rules from a given line on, or for a
//! single line:
//!
//! ```graphql
//! # lint-disable field-desc, args-desc
//! type InternalOnly {
//!   answer: Int # lint-disable-line
//! }
//! # lint-enable field-desc
//! ```

use crate::Finding;
use apollo_parser::{Lexer, TokenKind};
use regex::Regex;
use std::sync::LazyLock;

static COMMAND_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*(lint-\S+)(\s.*)?$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LintCommand {
    Disable,
    Enable,
    DisableLine,
}

/// One `#lint-*` comment, in source order.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct InlineLintConfig {
    pub(crate) command: LintCommand,
    /// Empty means every rule.
    pub(crate) rules: Vec<String>,
    pub(crate) line: usize,
}

/// Scan the comment tokens of the raw schema text for lint commands.
/// Comments that look like no known command are ignored.
pub(crate) fn extract_inline_lint_configs(source: &str) -> Vec<InlineLintConfig> {
    let mut configs = Vec::new();

    for token in Lexer::new(source) {
        let Ok(token) = token else {
            continue;
        };

        if token.kind() != TokenKind::Comment {
            continue;
        }

        let Some(captures) = COMMAND_PATTERN.captures(token.data()) else {
            continue;
        };

        let command = match &captures[1] {
            "lint-disable" => LintCommand::Disable,
            "lint-enable" => LintCommand::Enable,
            "lint-disable-line" => LintCommand::DisableLine,
            _ => continue,
        };

        let rules = captures
            .get(2)
            .map(|rules| sanitize_rules(rules.as_str()))
            .unwrap_or_default();

        configs.push(InlineLintConfig {
            command,
            rules,
            line: line_of_offset(source, token.index()),
        });
    }

    configs
}

fn sanitize_rules(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|rule| rule.trim().to_owned())
        .filter(|rule| !rule.is_empty())
        .collect()
}

fn line_of_offset(source: &str, offset: usize) -> usize {
    source[..offset].bytes().filter(|byte| *byte == b'\n').count() + 1
}

/// Apply the commands to a sorted finding list. Later commands win, except
/// that a `disable-line` on the finding's own line is final.
pub(crate) fn filter_findings(findings: Vec<Finding>, configs: &[InlineLintConfig]) -> Vec<Finding> {
    findings
        .into_iter()
        .filter(|finding| {
            let mut keep = true;

            for config in configs {
                if !applies_to(config, finding.rule) {
                    continue;
                }

                if config.command == LintCommand::DisableLine && config.line == finding.line {
                    return false;
                }

                if config.line < finding.line {
                    match config.command {
                        LintCommand::Enable => keep = true,
                        LintCommand::Disable => keep = false,
                        LintCommand::DisableLine => (),
                    }
                }
            }

            keep
        })
        .collect()
}

fn applies_to(config: &InlineLintConfig, rule: &str) -> bool {
    config.rules.is_empty()
        || config
            .rules
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(rule))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_commands_with_and_without_rule_lists() {
        let source = "\
# lint-disable
type a { b: C }
#lint-enable type-desc, field-desc
# lint-disable-line enum-caps
# a regular comment
# lint-gibberish enum-caps
";

        let configs = extract_inline_lint_configs(source);

        assert_eq!(
            configs,
            vec![
                InlineLintConfig {
                    command: LintCommand::Disable,
                    rules: vec![],
                    line: 1,
                },
                InlineLintConfig {
                    command: LintCommand::Enable,
                    rules: vec!["type-desc".to_owned(), "field-desc".to_owned()],
                    line: 3,
                },
                InlineLintConfig {
                    command: LintCommand::DisableLine,
                    rules: vec!["enum-caps".to_owned()],
                    line: 4,
                },
            ]
        );
    }

    #[test]
    fn whitespace_around_rule_separators_is_ignored() {
        let source = "# lint-disable type-desc ,  field-desc\ntype a { b: C }\n";

        let configs = extract_inline_lint_configs(source);

        assert_eq!(
            configs[0].rules,
            vec!["type-desc".to_owned(), "field-desc".to_owned()]
        );
    }

    fn finding_on_line(rule: &'static str, line: usize) -> Finding {
        Finding {
            rule,
            line,
            column: 1,
            message: String::new(),
        }
    }

    #[test]
    fn disable_then_enable_restores_findings() {
        let configs = vec![
            InlineLintConfig {
                command: LintCommand::Disable,
                rules: vec!["rule-x".to_owned()],
                line: 5,
            },
            InlineLintConfig {
                command: LintCommand::Enable,
                rules: vec!["rule-x".to_owned()],
                line: 6,
            },
        ];

        let kept = filter_findings(vec![finding_on_line("rule-x", 7)], &configs);

        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn disable_line_only_affects_its_own_line() {
        let configs = vec![InlineLintConfig {
            command: LintCommand::DisableLine,
            rules: vec![],
            line: 3,
        }];

        let findings = vec![
            finding_on_line("rule-x", 3),
            finding_on_line("rule-y", 3),
            finding_on_line("rule-x", 4),
        ];

        let kept = filter_findings(findings, &configs);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].line, 4);
    }

    #[test]
    fn rule_matching_is_case_insensitive() {
        let configs = vec![InlineLintConfig {
            command: LintCommand::Disable,
            rules: vec!["Rule-X".to_owned()],
            line: 1,
        }];

        let kept = filter_findings(vec![finding_on_line("rule-x", 2)], &configs);

        assert!(kept.is_empty());
    }
}
