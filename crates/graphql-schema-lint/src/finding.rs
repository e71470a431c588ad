use serde::Serialize;

/// A single rule violation in a schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Registry id of the rule that produced the finding.
    pub rule: &'static str,
    pub line: usize,
    pub column: usize,
    pub message: String,
}
