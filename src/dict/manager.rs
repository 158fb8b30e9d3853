//! Personal dictionary file: one accepted word per line, `#` comments allowed.

use anyhow::{Context, Result};
use colored::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Read the words in a personal dictionary; a missing file is empty.
pub fn load_words(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read personal dictionary: {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect())
}

/// Append words not already present; returns how many were added.
pub fn add_words(path: &Path, words: &[String]) -> Result<usize> {
    let existing: BTreeSet<String> = load_words(path)?.into_iter().collect();

    let mut added = BTreeSet::new();
    for word in words {
        let word = word.trim().to_lowercase();
        if !word.is_empty() && !existing.contains(&word) {
            added.insert(word);
        }
    }

    if added.is_empty() {
        return Ok(0);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create personal dictionary directory")?;
    }

    let mut content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    for word in &added {
        content.push_str(word);
        content.push('\n');
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write personal dictionary: {}", path.display()))?;

    tracing::info!(
        count = added.len(),
        path = %path.display(),
        "added words to personal dictionary"
    );
    Ok(added.len())
}

pub fn list_words(path: &Path) -> Result<()> {
    let words = load_words(path)?;

    if words.is_empty() {
        println!("{}", "Personal dictionary is empty.".yellow());
        println!(
            "Run {} to add a word.",
            "writecoach dict add <WORD>".cyan()
        );
        return Ok(());
    }

    println!("{}", "Personal dictionary:".bold());
    println!();
    for word in &words {
        println!("  {} {}", "✓".green(), word);
    }
    println!();
    println!("Path: {}", path.display().to_string().dimmed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        assert!(load_words(&dir.path().join("none.txt")).unwrap().is_empty());
    }

    #[test]
    fn test_add_words_dedups_and_creates_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("personal.txt");

        let added = add_words(&path, &["Hogwarts".to_string(), "hogwarts".to_string()]).unwrap();
        assert_eq!(added, 1);

        let added = add_words(&path, &["hogwarts".to_string(), "Quidditch".to_string()]).unwrap();
        assert_eq!(added, 1);

        assert_eq!(load_words(&path).unwrap(), vec!["hogwarts", "quidditch"]);
    }

    #[test]
    fn test_comments_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("personal.txt");
        fs::write(&path, "# my words\nNarnia\n\n").unwrap();
        assert_eq!(load_words(&path).unwrap(), vec!["narnia"]);
    }
}
