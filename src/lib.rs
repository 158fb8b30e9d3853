pub mod analysis;
pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod lint;

pub use checker::GrammarChecker;
pub use config::Config;

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of problem a diagnostic describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    Grammar,
    Spelling,
    Punctuation,
    Capitalization,
    WordChoice,
    Style,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Grammar => "grammar",
            DiagnosticKind::Spelling => "spelling",
            DiagnosticKind::Punctuation => "punctuation",
            DiagnosticKind::Capitalization => "capitalization",
            DiagnosticKind::WordChoice => "word-choice",
            DiagnosticKind::Style => "style",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// A flagged span of the checked text.
///
/// `start` and `end` are byte offsets into the text that was checked and
/// always land on char boundaries, with `start <= end <= text.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub start: usize,
    pub end: usize,
    pub kind: DiagnosticKind,
    pub message: String,
    pub suggestions: Vec<String>,
    pub severity: Severity,
    pub rule_id: String,
}

impl Diagnostic {
    /// The flagged slice of `text`, or an empty string if `text` is not the
    /// document this diagnostic was produced for.
    pub fn excerpt<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start..self.end).unwrap_or("")
    }
}

/// Raw output of the spelling pass before it is merged with rule diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellingError {
    pub start: usize,
    pub end: usize,
    pub word: String,
    pub suggestions: Vec<String>,
}

impl From<SpellingError> for Diagnostic {
    fn from(error: SpellingError) -> Self {
        Diagnostic {
            start: error.start,
            end: error.end,
            kind: DiagnosticKind::Spelling,
            message: format!("Possible spelling error: \"{}\"", error.word),
            suggestions: error.suggestions,
            severity: Severity::High,
            rule_id: "spelling".to_string(),
        }
    }
}

/// Outcome of checking (or fixing) one document.
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub error_count: usize,
    pub fixed_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// 1-based line and column (in chars) of a byte offset, for display.
pub fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    let before = text.get(..offset).unwrap_or(text);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spelling_error_conversion() {
        let diagnostic: Diagnostic = SpellingError {
            start: 7,
            end: 14,
            word: "recieve".to_string(),
            suggestions: vec!["receive".to_string()],
        }
        .into();

        assert_eq!(diagnostic.kind, DiagnosticKind::Spelling);
        assert_eq!(diagnostic.severity, Severity::High);
        assert_eq!(diagnostic.rule_id, "spelling");
        assert_eq!(diagnostic.message, "Possible spelling error: \"recieve\"");
    }

    #[test]
    fn test_line_column() {
        let text = "first line\nsecond line";
        assert_eq!(line_column(text, 0), (1, 1));
        assert_eq!(line_column(text, 11), (2, 1));
        assert_eq!(line_column(text, 18), (2, 8));
    }

    #[test]
    fn test_diagnostic_serializes_camel_case() {
        let diagnostic = Diagnostic {
            start: 0,
            end: 3,
            kind: DiagnosticKind::WordChoice,
            message: "m".to_string(),
            suggestions: Vec::new(),
            severity: Severity::Medium,
            rule_id: "your-youre".to_string(),
        };
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["ruleId"], "your-youre");
        assert_eq!(json["kind"], "word-choice");
        assert_eq!(json["severity"], "medium");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }
}
