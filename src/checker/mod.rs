pub mod dictionary;
pub mod rules;
pub mod suggestions;
pub mod tokenizer;

use crate::config::Config;
use crate::{Diagnostic, SpellingError};
use anyhow::Result;
use dictionary::Dictionary;
use regex::Regex;
use rules::{Rule, RuleSet};
use std::collections::HashSet;
use std::sync::Arc;

/// Words every checker accepts from the start.
const SEED_WORDS: &[&str] = &["ok", "okay", "yeah", "yep"];

/// Rule engine plus spelling pass over a single document.
///
/// Checking is synchronous and takes `&self`, so one checker can serve many
/// callers; only the custom dictionary and ignore list need `&mut self`, and
/// both only ever grow.
pub struct GrammarChecker {
    rules: Arc<RuleSet>,
    dictionary: Arc<Dictionary>,
    custom_words: HashSet<String>,
    ignored_words: HashSet<String>,
    ignore_patterns: Vec<Regex>,
}

impl GrammarChecker {
    /// Checker with the built-in rules and dictionary and default settings.
    pub fn new() -> Result<Self> {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut rules = RuleSet::standard()?;
        for custom in &config.custom_rules {
            rules.push(custom.compile()?)?;
        }
        let mut rules = rules.without(&config.disabled_rules);
        if config.exhaustive_matching {
            rules = rules.exhaustive();
        }

        let dictionary = Dictionary::embedded()?;
        let mut checker = Self::with_parts(Arc::new(rules), Arc::new(dictionary));

        // Compile ignore patterns
        for pattern in &config.ignore_patterns {
            match Regex::new(pattern) {
                Ok(re) => checker.ignore_patterns.push(re),
                Err(e) => tracing::warn!(%pattern, error = %e, "invalid ignore pattern"),
            }
        }

        for word in &config.ignored_words {
            checker.ignore_word(word);
        }

        // Load personal dictionary
        if let Some(path) = &config.personal_dictionary {
            for word in crate::dict::manager::load_words(path)? {
                checker.add_to_custom_dictionary(&word);
            }
        }

        Ok(checker)
    }

    /// Checker over shared, already-built rules and dictionary.
    pub fn with_parts(rules: Arc<RuleSet>, dictionary: Arc<Dictionary>) -> Self {
        Self {
            rules,
            dictionary,
            custom_words: SEED_WORDS.iter().map(|w| w.to_string()).collect(),
            ignored_words: HashSet::new(),
            ignore_patterns: Vec::new(),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Accept `word` as correctly spelled for the life of this checker.
    pub fn add_to_custom_dictionary(&mut self, word: &str) {
        self.custom_words.insert(normalize(word));
    }

    /// Never report `word`, whatever its spelling.
    pub fn ignore_word(&mut self, word: &str) {
        self.ignored_words.insert(normalize(word));
    }

    /// Run every rule over `text`.
    ///
    /// `FindFirst` rules report at most one match per call; `FindAll` rules
    /// report every non-overlapping match.
    #[tracing::instrument(skip_all, fields(len = text.len()))]
    pub fn check_grammar(&self, text: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for rule in self.rules.rules() {
            diagnostics.extend(
                rule.matches(text)
                    .into_iter()
                    .map(|found| diagnostic_for(rule, found)),
            );
        }

        tracing::debug!(count = diagnostics.len(), "grammar pass complete");
        diagnostics
    }

    /// Flag words that are neither known nor accepted and have a correction.
    #[tracing::instrument(skip_all, fields(len = text.len()))]
    pub fn check_spelling(&self, text: &str) -> Vec<SpellingError> {
        let mut errors = Vec::new();

        for token in tokenizer::words(text) {
            let word = token.normalized();

            if self.is_accepted(&word) {
                continue;
            }

            // Exact misspellings win over distance ranking and ignore patterns
            let suggestions = match self.dictionary.misspelling(&word) {
                Some(corrections) => corrections.to_vec(),
                None if self.matches_ignore_pattern(token.text) => continue,
                None => suggestions::generate(&word, &self.dictionary),
            };

            if suggestions.is_empty() {
                continue;
            }

            errors.push(SpellingError {
                start: token.start,
                end: token.end,
                word: token.text.to_string(),
                suggestions: suggestions
                    .iter()
                    .map(|s| rules::match_case(token.text, s))
                    .collect(),
            });
        }

        tracing::debug!(count = errors.len(), "spelling pass complete");
        errors
    }

    /// Grammar and spelling diagnostics together, ordered by start offset.
    ///
    /// Overlapping diagnostics are all kept; the sort is stable, so grammar
    /// findings precede spelling findings that start at the same offset.
    pub fn check_text(&self, text: &str) -> Vec<Diagnostic> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut diagnostics = self.check_grammar(text);
        diagnostics.extend(self.check_spelling(text).into_iter().map(Diagnostic::from));
        diagnostics.sort_by_key(|d| d.start);
        diagnostics
    }

    fn is_accepted(&self, word: &str) -> bool {
        // Skip single characters
        word.chars().count() <= 1
            || self.custom_words.contains(word)
            || self.ignored_words.contains(word)
            || self.dictionary.contains(word)
    }

    fn matches_ignore_pattern(&self, original: &str) -> bool {
        self.ignore_patterns
            .iter()
            .any(|pattern| pattern.is_match(original))
    }
}

fn diagnostic_for(rule: &Rule, found: regex::Match<'_>) -> Diagnostic {
    Diagnostic {
        start: found.start(),
        end: found.end(),
        kind: rule.category.kind(),
        message: rule.message.clone(),
        suggestions: rule.suggestions.suggest(found.as_str()),
        severity: rule.category.severity(),
        rule_id: rule.id.clone(),
    }
}

fn normalize(word: &str) -> String {
    word.trim().replace('’', "'").to_lowercase()
}
