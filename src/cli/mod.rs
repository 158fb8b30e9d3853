pub mod output;

use crate::checker::GrammarChecker;
use crate::lint::{apply_edits, Linter, TextEdit};
use crate::{CheckResult, DiagnosticKind};
use anyhow::{Context, Result};
use output::Choice;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions picked up when a directory is given on the command line.
pub const CHECKED_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

/// Expand directory arguments into the text files beneath them.
///
/// Plain file arguments are kept whatever their extension; hidden entries
/// inside a directory are skipped.
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.path()));

        for entry in walker.filter_map(|e| e.ok()) {
            if entry.file_type().is_file() && has_checked_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    files
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_checked_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| CHECKED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn read(file_path: &Path) -> Result<String> {
    fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path.display()))
}

fn write(file_path: &Path, content: &str) -> Result<()> {
    fs::write(file_path, content)
        .with_context(|| format!("Failed to write file: {}", file_path.display()))
}

/// Check one file; returns its text along with the result so the caller can
/// print excerpts.
pub fn check_file(checker: &GrammarChecker, file_path: &Path) -> Result<(String, CheckResult)> {
    let content = read(file_path)?;
    let diagnostics = checker.check_text(&content);

    tracing::debug!(file = %file_path.display(), count = diagnostics.len(), "checked file");

    let result = CheckResult {
        error_count: diagnostics.len(),
        fixed_count: 0,
        diagnostics,
    };
    Ok((content, result))
}

/// Apply the first suggestion of every diagnostic and write the file back.
pub fn fix_file(checker: &GrammarChecker, file_path: &Path) -> Result<CheckResult> {
    let content = read(file_path)?;
    let edits = Linter::new(checker).fixes(&content);
    let (fixed, fixed_count) = apply_edits(&content, &edits)?;

    if fixed_count > 0 {
        write(file_path, &fixed)?;
    }

    let remaining = checker.check_text(&fixed);
    Ok(CheckResult {
        error_count: remaining.len(),
        fixed_count,
        diagnostics: remaining,
    })
}

/// Walk through each diagnostic and let the user pick a correction.
///
/// Returns the result and the words the user asked to add to their
/// personal dictionary.
pub fn fix_file_interactive(
    checker: &GrammarChecker,
    file_path: &Path,
    colored: bool,
) -> Result<(CheckResult, Vec<String>)> {
    let content = read(file_path)?;
    let diagnostics = checker.check_text(&content);

    let mut edits = Vec::new();
    let mut words_to_add = Vec::new();

    for diagnostic in &diagnostics {
        if diagnostic.suggestions.is_empty() {
            continue;
        }

        let is_spelling = diagnostic.kind == DiagnosticKind::Spelling;
        match output::prompt_correction(&content, diagnostic, is_spelling, colored)? {
            Choice::Skip => {}
            Choice::Replace(insert) => edits.push(TextEdit {
                from: diagnostic.start,
                to: diagnostic.end,
                insert,
            }),
            Choice::AddToDictionary => {
                words_to_add.push(diagnostic.excerpt(&content).to_lowercase());
            }
            Choice::Quit => break,
        }
    }

    let (fixed, fixed_count) = apply_edits(&content, &edits)?;
    if fixed_count > 0 {
        write(file_path, &fixed)?;
    }

    let result = CheckResult {
        error_count: 0,
        fixed_count,
        diagnostics: Vec::new(),
    };
    Ok((result, words_to_add))
}
