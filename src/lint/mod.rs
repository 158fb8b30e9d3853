//! Editor-facing view of checker diagnostics: severities, hover messages and
//! single-span quick fixes.

pub mod debounce;

use crate::checker::GrammarChecker;
use crate::{Diagnostic, Severity};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub use debounce::DebouncedChecker;

/// Delay an editor should wait after the last keystroke before linting.
pub const LINT_DELAY: Duration = Duration::from_millis(500);

pub const SOURCE: &str = "writecoach";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("edit range {from}..{to} is reversed")]
    Reversed { from: usize, to: usize },

    #[error("edit range {from}..{to} is outside a document of {len} bytes")]
    OutOfBounds { from: usize, to: usize, len: usize },

    #[error("edit offset {0} is not on a character boundary")]
    NotCharBoundary(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorSeverity {
    Error,
    Warning,
    Info,
}

impl From<Severity> for EditorSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::High => EditorSeverity::Error,
            Severity::Medium => EditorSeverity::Warning,
            Severity::Low => EditorSeverity::Info,
        }
    }
}

/// Replace bytes `from..to` of a document with `insert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl TextEdit {
    fn validate(&self, document: &str) -> Result<(), EditError> {
        if self.from > self.to {
            return Err(EditError::Reversed {
                from: self.from,
                to: self.to,
            });
        }
        if self.to > document.len() {
            return Err(EditError::OutOfBounds {
                from: self.from,
                to: self.to,
                len: document.len(),
            });
        }
        for offset in [self.from, self.to] {
            if !document.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary(offset));
            }
        }
        Ok(())
    }

    /// The edited document. Nothing outside `from..to` changes.
    pub fn apply(&self, document: &str) -> Result<String, EditError> {
        let mut edited = document.to_string();
        self.apply_in_place(&mut edited)?;
        Ok(edited)
    }

    /// Edit `document` in place; on error it is left untouched.
    pub fn apply_in_place(&self, document: &mut String) -> Result<(), EditError> {
        self.validate(document)?;
        document.replace_range(self.from..self.to, &self.insert);
        Ok(())
    }
}

/// Apply several edits as one change.
///
/// Edits are applied back to front so earlier offsets stay valid; an edit
/// overlapping one already taken is skipped. Returns the new document and
/// how many edits were applied.
pub fn apply_edits(document: &str, edits: &[TextEdit]) -> Result<(String, usize), EditError> {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by(|a, b| b.from.cmp(&a.from).then(b.to.cmp(&a.to)));

    for edit in &ordered {
        edit.validate(document)?;
    }

    let mut edited = document.to_string();
    let mut applied = 0;
    let mut floor = usize::MAX;

    for edit in ordered {
        if edit.to > floor {
            continue;
        }
        edited.replace_range(edit.from..edit.to, &edit.insert);
        floor = edit.from;
        applied += 1;
    }

    Ok((edited, applied))
}

/// A user-triggered action that applies one suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickFix {
    pub label: String,
    pub edit: TextEdit,
}

impl QuickFix {
    pub fn apply(&self, document: &str) -> Result<String, EditError> {
        self.edit.apply(document)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorDiagnostic {
    pub from: usize,
    pub to: usize,
    pub message: String,
    pub severity: EditorSeverity,
    pub source: String,
    pub actions: Vec<QuickFix>,
}

impl From<&Diagnostic> for EditorDiagnostic {
    fn from(diagnostic: &Diagnostic) -> Self {
        let message = if diagnostic.suggestions.is_empty() {
            diagnostic.message.clone()
        } else {
            format!(
                "{} (Suggestion: {})",
                diagnostic.message,
                diagnostic.suggestions.join(", ")
            )
        };

        let actions = diagnostic
            .suggestions
            .first()
            .map(|suggestion| QuickFix {
                label: format!("Fix: {}", suggestion),
                edit: TextEdit {
                    from: diagnostic.start,
                    to: diagnostic.end,
                    insert: suggestion.clone(),
                },
            })
            .into_iter()
            .collect();

        EditorDiagnostic {
            from: diagnostic.start,
            to: diagnostic.end,
            message,
            severity: diagnostic.severity.into(),
            source: SOURCE.to_string(),
            actions,
        }
    }
}

/// Runs a checker on demand and converts the result for an editor.
pub struct Linter<'a> {
    checker: &'a GrammarChecker,
}

impl<'a> Linter<'a> {
    pub fn new(checker: &'a GrammarChecker) -> Self {
        Self { checker }
    }

    pub fn lint(&self, document: &str) -> Vec<EditorDiagnostic> {
        self.checker
            .check_text(document)
            .iter()
            .map(EditorDiagnostic::from)
            .collect()
    }

    /// First quick fix of every diagnostic, as edits for [`apply_edits`].
    pub fn fixes(&self, document: &str) -> Vec<TextEdit> {
        self.lint(document)
            .into_iter()
            .filter_map(|diagnostic| diagnostic.actions.into_iter().next())
            .map(|fix| fix.edit)
            .collect()
    }
}
