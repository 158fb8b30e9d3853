use crate::analysis::FeedbackReport;
use crate::{line_column, CheckResult, Diagnostic, Severity};
use anyhow::Result;
use colored::*;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDiagnostic<'a> {
    file: String,
    line: usize,
    column: usize,
    excerpt: &'a str,
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    files_checked: usize,
    total_errors: usize,
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

pub fn print_diagnostics(
    file_path: &Path,
    text: &str,
    result: &CheckResult,
    colored_output: bool,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            print_text_diagnostics(file_path, text, result, colored_output);
            Ok(())
        }
        OutputFormat::Json => print_json_diagnostics(file_path, text, result),
    }
}

fn print_text_diagnostics(
    file_path: &Path,
    text: &str,
    result: &CheckResult,
    colored_output: bool,
) {
    if result.diagnostics.is_empty() {
        return;
    }

    let file_name = file_path.display().to_string();
    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }

    for diagnostic in &result.diagnostics {
        let (line, column) = line_column(text, diagnostic.start);
        let position = format!("{}:{}", line, column);
        let excerpt = diagnostic.excerpt(text);

        if colored_output {
            println!(
                "  {} {} {} {}",
                position.blue().bold(),
                paint_kind(diagnostic),
                excerpt.red().bold(),
                diagnostic.message
            );

            if !diagnostic.suggestions.is_empty() {
                let suggestions = diagnostic
                    .suggestions
                    .iter()
                    .map(|s| s.green().to_string())
                    .collect::<Vec<_>>()
                    .join(&", ".dimmed().to_string());
                println!("    {} {}", "→".dimmed(), suggestions);
            }
        } else {
            println!(
                "  {} [{}] {} {}",
                position, diagnostic.kind, excerpt, diagnostic.message
            );

            if !diagnostic.suggestions.is_empty() {
                println!("    → {}", diagnostic.suggestions.join(", "));
            }
        }
    }
}

fn paint_kind(diagnostic: &Diagnostic) -> ColoredString {
    let label = format!("[{}]", diagnostic.kind);
    match diagnostic.severity {
        Severity::High => label.red(),
        Severity::Medium => label.yellow(),
        Severity::Low => label.cyan(),
    }
}

fn print_json_diagnostics(file_path: &Path, text: &str, result: &CheckResult) -> Result<()> {
    let diagnostics = result
        .diagnostics
        .iter()
        .map(|diagnostic| {
            let (line, column) = line_column(text, diagnostic.start);
            JsonDiagnostic {
                file: file_path.display().to_string(),
                line,
                column,
                excerpt: diagnostic.excerpt(text),
                diagnostic,
            }
        })
        .collect();

    let output = JsonOutput {
        files_checked: 1,
        total_errors: result.error_count,
        diagnostics,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_check_summary(total_errors: usize, files: usize, colored: bool) {
    println!();
    let file_word = if files == 1 { "file" } else { "files" };

    if total_errors == 0 {
        if colored {
            println!("{}", "✓ No problems found!".green().bold());
        } else {
            println!("✓ No problems found!");
        }
    } else {
        let error_word = if total_errors == 1 { "problem" } else { "problems" };
        if colored {
            println!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total_errors.to_string().red().bold(),
                error_word,
                files,
                file_word
            );
        } else {
            println!("✗ {} {} found in {} {}", total_errors, error_word, files, file_word);
        }
    }
}

pub fn print_fix_summary(total_fixed: usize, files: usize, colored: bool) {
    println!();
    let file_word = if files == 1 { "file" } else { "files" };

    if total_fixed == 0 {
        if colored {
            println!("{}", "No corrections needed!".green().bold());
        } else {
            println!("No corrections needed!");
        }
    } else {
        let fix_word = if total_fixed == 1 { "correction" } else { "corrections" };
        if colored {
            println!(
                "{} {} {} applied to {} {}",
                "✓".green().bold(),
                total_fixed.to_string().green().bold(),
                fix_word,
                files,
                file_word
            );
        } else {
            println!("✓ {} {} applied to {} {}", total_fixed, fix_word, files, file_word);
        }
    }
}

/// What the user picked for one diagnostic in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Skip,
    Replace(String),
    AddToDictionary,
    Quit,
}

pub fn prompt_correction(
    text: &str,
    diagnostic: &Diagnostic,
    offer_dictionary: bool,
    colored: bool,
) -> Result<Choice> {
    let (line, column) = line_column(text, diagnostic.start);
    let excerpt = diagnostic.excerpt(text);
    let context = line_context(text, diagnostic.start);

    if colored {
        println!(
            "\n{} {}:{}",
            diagnostic.message.yellow().bold(),
            line.to_string().blue(),
            column.to_string().blue()
        );
        println!("  {}", context.replacen(excerpt, &excerpt.red().bold().to_string(), 1));
    } else {
        println!("\n{} {}:{}", diagnostic.message, line, column);
        println!("  {}", context);
    }

    let mut options = vec!["Skip".to_string()];
    options.extend(diagnostic.suggestions.iter().take(9).cloned());
    if offer_dictionary {
        options.push("Add to dictionary".to_string());
    }
    options.push("Quit".to_string());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choice")
        .items(&options)
        .default(0)
        .interact_opt()?;

    let suggestions = diagnostic.suggestions.len().min(9);
    let choice = match selection {
        None | Some(0) => Choice::Skip,
        Some(i) if i <= suggestions => Choice::Replace(diagnostic.suggestions[i - 1].clone()),
        Some(i) if offer_dictionary && i == suggestions + 1 => Choice::AddToDictionary,
        Some(_) => Choice::Quit,
    };
    Ok(choice)
}

/// The line containing `offset`, trimmed.
fn line_context(text: &str, offset: usize) -> &str {
    let offset = offset.min(text.len());
    let start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = text[offset..].find('\n').map(|i| offset + i).unwrap_or(text.len());
    text[start..end].trim()
}

pub fn print_feedback(report: &FeedbackReport, colored: bool, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let heading = |title: &str| {
        if colored {
            println!("\n{}", title.bold().underline());
        } else {
            println!("\n{}", title);
        }
    };

    heading(&format!("Feedback ({} writing, {} words)", report.text_type, report.word_count));
    if report.counts.is_empty() {
        println!("  No grammar or spelling problems found.");
    }
    for (kind, count) in &report.counts {
        println!("  {:<16} {}", kind, count);
    }

    let vocabulary = &report.vocabulary;
    heading(&format!("Vocabulary {}/5", vocabulary.score));
    println!("  {}", vocabulary.feedback);
    for overused in &vocabulary.overused_words {
        println!("  overused: {} ({}x)", overused.word, overused.count);
    }
    for suggestion in &vocabulary.suggestions {
        let word = if colored {
            suggestion.word.green().to_string()
        } else {
            suggestion.word.to_string()
        };
        match suggestion.replaces {
            Some(weak) => println!("  {} → {}: {}", weak, word, suggestion.definition),
            None => println!("  try {}: {}", word, suggestion.definition),
        }
    }

    let sentences = &report.sentences;
    heading(&format!("Sentences {}/5", sentences.variety_score));
    println!("  {}", sentences.variety_feedback);
    if sentences.total_sentences > 0 {
        println!(
            "  {} sentences, {} words on average ({} simple, {} compound, {} complex)",
            sentences.total_sentences,
            sentences.average_length,
            sentences.shapes.simple,
            sentences.shapes.compound,
            sentences.shapes.complex
        );
    }
    for strength in &sentences.strengths {
        println!("  ✓ {}", strength);
    }
    for issue in &sentences.issues {
        println!("  • {}: {}", issue.sentence, issue.suggestion);
    }
    for suggestion in &sentences.suggestions {
        println!("  → {}", suggestion);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Text.to_string(), "text");
    }

    #[test]
    fn test_line_context() {
        let text = "first line\n  second line here\nthird";
        assert_eq!(line_context(text, 13), "second line here");
        assert_eq!(line_context(text, 0), "first line");
        assert_eq!(line_context(text, text.len()), "third");
    }
}
