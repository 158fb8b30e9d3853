use crate::{DiagnosticKind, Severity};
use regex::{Match, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid pattern for rule `{id}`: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("duplicate rule id `{0}`")]
    DuplicateId(String),

    #[error("rule `{id}` has no capture group {group}")]
    MissingGroup { id: String, group: usize },
}

/// Named group of rules sharing one diagnostic kind and severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    SubjectVerbAgreement,
    WordChoice,
    Punctuation,
    Capitalization,
    Style,
    ThanThen,
    ToToo,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 7] = [
        RuleCategory::SubjectVerbAgreement,
        RuleCategory::WordChoice,
        RuleCategory::Punctuation,
        RuleCategory::Capitalization,
        RuleCategory::Style,
        RuleCategory::ThanThen,
        RuleCategory::ToToo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::SubjectVerbAgreement => "subject-verb-agreement",
            RuleCategory::WordChoice => "word-choice",
            RuleCategory::Punctuation => "punctuation",
            RuleCategory::Capitalization => "capitalization",
            RuleCategory::Style => "style",
            RuleCategory::ThanThen => "than-then",
            RuleCategory::ToToo => "to-too",
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            RuleCategory::SubjectVerbAgreement | RuleCategory::ThanThen | RuleCategory::ToToo => {
                DiagnosticKind::Grammar
            }
            RuleCategory::WordChoice => DiagnosticKind::WordChoice,
            RuleCategory::Punctuation => DiagnosticKind::Punctuation,
            RuleCategory::Capitalization => DiagnosticKind::Capitalization,
            RuleCategory::Style => DiagnosticKind::Style,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            RuleCategory::WordChoice => Severity::Medium,
            RuleCategory::Style => Severity::Low,
            _ => Severity::High,
        }
    }
}

/// How many matches a rule may report per check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    FindFirst,
    FindAll,
}

/// Produces replacement text for a matched span.
#[derive(Clone)]
pub enum SuggestionStrategy {
    Static(Vec<String>),
    DeriveFromMatch(fn(&str) -> Vec<String>),
}

impl fmt::Debug for SuggestionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionStrategy::Static(list) => f.debug_tuple("Static").field(list).finish(),
            SuggestionStrategy::DeriveFromMatch(_) => f.write_str("DeriveFromMatch(..)"),
        }
    }
}

impl SuggestionStrategy {
    pub fn fixed(suggestions: &[&str]) -> Self {
        SuggestionStrategy::Static(suggestions.iter().map(|s| s.to_string()).collect())
    }

    pub fn suggest(&self, matched: &str) -> Vec<String> {
        match self {
            SuggestionStrategy::Static(list) => list.clone(),
            SuggestionStrategy::DeriveFromMatch(derive) => derive(matched),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub category: RuleCategory,
    pub pattern: Regex,
    pub message: String,
    pub suggestions: SuggestionStrategy,
    pub match_mode: MatchMode,
    /// Capture group to report instead of the whole match.
    pub span_group: Option<usize>,
}

impl Rule {
    pub fn new(
        id: &str,
        category: RuleCategory,
        pattern: &str,
        message: &str,
        suggestions: SuggestionStrategy,
        match_mode: MatchMode,
    ) -> Result<Self, RuleError> {
        let pattern = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
            id: id.to_string(),
            source,
        })?;

        Ok(Self {
            id: id.to_string(),
            category,
            pattern,
            message: message.to_string(),
            suggestions,
            match_mode,
            span_group: None,
        })
    }

    /// Report only capture `group` of each match; the pattern around it is
    /// context.
    pub fn with_span_group(mut self, group: usize) -> Result<Self, RuleError> {
        if group >= self.pattern.captures_len() {
            return Err(RuleError::MissingGroup { id: self.id, group });
        }
        self.span_group = Some(group);
        Ok(self)
    }

    /// Spans this rule flags in `text`: the first one for `FindFirst`,
    /// every non-overlapping one for `FindAll`.
    pub fn matches<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        let group = self.span_group.unwrap_or(0);
        let found = self
            .pattern
            .captures_iter(text)
            .filter_map(move |captures| captures.get(group));

        match self.match_mode {
            MatchMode::FindFirst => found.take(1).collect(),
            MatchMode::FindAll => found.collect(),
        }
    }
}

/// Immutable rule table, built once and shared between checkers.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

const THEN_FOR_THAN: &str = "Did you mean 'than' (for comparison)? 'Then' refers to time.";
const THAN_FOR_THEN: &str =
    "Did you mean 'then' (for time sequence)? 'Than' is used for comparisons.";

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        let mut set = Self {
            rules: Vec::with_capacity(rules.len()),
        };
        for rule in rules {
            set.push(rule)?;
        }
        Ok(set)
    }

    /// The built-in rule table.
    pub fn standard() -> Result<Self, RuleError> {
        use MatchMode::{FindAll, FindFirst};
        use RuleCategory::*;
        use SuggestionStrategy::DeriveFromMatch;

        let rules = vec![
            // subject-verb agreement
            Rule::new(
                "singular-subject-verb",
                SubjectVerbAgreement,
                r"(?i)\b(he|she|it)\s+(are|were)\b",
                "Subject-verb disagreement. Use 'is' or 'was' with singular subjects.",
                DeriveFromMatch(singular_verb),
                FindFirst,
            )?,
            Rule::new(
                "plural-subject-verb",
                SubjectVerbAgreement,
                r"(?i)\b(they|we|you)\s+(is|was)\b",
                "Subject-verb disagreement. Use 'are' or 'were' with plural subjects.",
                DeriveFromMatch(plural_verb),
                FindFirst,
            )?,
            Rule::new(
                "first-person-verb",
                SubjectVerbAgreement,
                r"\bI\s+(is|are)\b",
                "Subject-verb disagreement. Use 'am' with 'I'.",
                DeriveFromMatch(first_person_verb),
                FindFirst,
            )?,
            Rule::new(
                "third-person-dont",
                SubjectVerbAgreement,
                r"(?i)\b(he|she)\s+don't\b",
                "Subject-verb disagreement. Use 'doesn't' with 'he' or 'she'.",
                DeriveFromMatch(doesnt),
                FindFirst,
            )?,
            // word choice
            Rule::new(
                "your-youre",
                WordChoice,
                r"(?i)\byour\s+(going|coming|doing|welcome)\b",
                "Did you mean 'you're' (you are)?",
                DeriveFromMatch(your_to_youre),
                FindFirst,
            )?,
            Rule::new(
                "its-it-is",
                WordChoice,
                r"(?i)\bits\s+(going|coming|doing|been|not)\b",
                "Did you mean 'it's' (it is)?",
                DeriveFromMatch(its_to_it_is),
                FindFirst,
            )?,
            Rule::new(
                "modal-of",
                WordChoice,
                r"(?i)\b(could|should|would|must|might)\s+of\b",
                "Use 'have' after could, should, would, must or might.",
                DeriveFromMatch(of_to_have),
                FindFirst,
            )?,
            Rule::new(
                "a-lot-of",
                WordChoice,
                r"(?i)\bthere\s+(is|are)\s+a\s+lot\s+of\b",
                "Consider using 'many' or 'much' instead of 'a lot of' for more formal writing.",
                SuggestionStrategy::fixed(&["there are many", "there is much"]),
                FindFirst,
            )?,
            // punctuation
            Rule::new(
                "space-before-comma",
                Punctuation,
                r"[ \t]+,",
                "Remove space before comma.",
                DeriveFromMatch(trim_leading_space),
                FindAll,
            )?,
            Rule::new(
                "space-before-mark",
                Punctuation,
                r"[ \t]+[.!?;:]",
                "Remove space before punctuation mark.",
                DeriveFromMatch(trim_leading_space),
                FindAll,
            )?,
            Rule::new(
                "missing-space-after-mark",
                Punctuation,
                r"[A-Za-z][,;:][A-Za-z]",
                "Missing space after punctuation mark.",
                DeriveFromMatch(space_after_mark),
                FindAll,
            )?,
            Rule::new(
                "missing-space-after-period",
                Punctuation,
                r"[a-z][.!?][A-Z]",
                "Add a space after the end of a sentence.",
                DeriveFromMatch(space_after_mark),
                FindAll,
            )?,
            // capitalization
            Rule::new(
                "sentence-start",
                Capitalization,
                r"(?m)^[ \t]*[a-z]",
                "Capitalize the first letter of each sentence.",
                DeriveFromMatch(uppercase),
                FindAll,
            )?,
            Rule::new(
                "after-sentence-end",
                Capitalization,
                r"[.!?][ \t]+[a-z]",
                "Capitalize the first letter after a period.",
                DeriveFromMatch(uppercase),
                FindAll,
            )?,
            Rule::new(
                "pronoun-i",
                Capitalization,
                r"\bi\b",
                "The pronoun 'I' should always be capitalized.",
                DeriveFromMatch(uppercase),
                FindAll,
            )?,
            // style
            Rule::new(
                "very-adjective",
                Style,
                r"(?i)\bvery\s+(good|bad|big|small|nice|pretty|ugly|happy|sad|tired|scared|cold|hot)\b",
                "Consider using a stronger adjective instead of 'very + adjective'.",
                DeriveFromMatch(stronger_adjective),
                FindFirst,
            )?,
            Rule::new(
                "vague-thing",
                Style,
                r"(?i)\bthing\b",
                "Consider using a more specific noun instead of 'thing'.",
                SuggestionStrategy::fixed(&["item", "object", "matter", "issue", "concept"]),
                FindFirst,
            )?,
            // than / then
            Rule::new(
                "comparative-then",
                ThanThen,
                r"(?i)\b(better|worse|more|less|greater|smaller|higher|lower|faster|slower|bigger|older|younger|taller|shorter|stronger|weaker|richer|poorer|happier|sadder|easier|harder)\s+then\b",
                THEN_FOR_THAN,
                DeriveFromMatch(then_to_than),
                FindFirst,
            )?,
            Rule::new(
                "rather-other-then",
                ThanThen,
                r"(?i)\b(rather|other)\s+then\b",
                THEN_FOR_THAN,
                DeriveFromMatch(then_to_than),
                FindFirst,
            )?,
            Rule::new(
                "rather-phrase-then",
                ThanThen,
                r"(?i)\brather(\s+[a-z']+){1,3}\s+then\b",
                THEN_FOR_THAN,
                DeriveFromMatch(then_to_than),
                FindFirst,
            )?,
            Rule::new(
                "more-less-phrase-then",
                ThanThen,
                r"(?i)\b(more|less)\s+\w+\s+then\b",
                THEN_FOR_THAN,
                DeriveFromMatch(then_to_than),
                FindFirst,
            )?,
            Rule::new(
                "sequence-than",
                ThanThen,
                r"(?i)\b(first|next|and|since|back|until|now)\s+than\b",
                THAN_FOR_THEN,
                DeriveFromMatch(than_to_then),
                FindFirst,
            )?,
            Rule::new(
                "sequence-clause-than",
                ThanThen,
                r"(?i)\b(first|next)\b[^.!?]*?,\s*(than)\b",
                THAN_FOR_THEN,
                DeriveFromMatch(than_to_then),
                FindFirst,
            )?
            .with_span_group(2)?,
            // to / too
            Rule::new(
                "to-degree",
                ToToo,
                r"(?i)\bto\s+(much|late|early|soon)\b",
                "Did you mean 'too' (excessively)?",
                DeriveFromMatch(to_to_too),
                FindFirst,
            )?,
            Rule::new(
                "pronoun-to-end",
                ToToo,
                r"(?i)\b(me|you|us|them|him|her)\s+to[.!?]",
                "Did you mean 'too' (also)?",
                DeriveFromMatch(to_to_too),
                FindFirst,
            )?,
            Rule::new(
                "motion-too",
                ToToo,
                r"(?i)\b(went|go|goes|going|came|come|walked|ran|drove)\s+too\s+(the|a|an|my|his|her|their|our|school|bed|sleep)\b",
                "Did you mean 'to' (direction)? 'Too' means also or excessively.",
                DeriveFromMatch(too_to_to),
                FindFirst,
            )?,
        ];

        Self::new(rules)
    }

    pub fn push(&mut self, rule: Rule) -> Result<(), RuleError> {
        if self.rules.iter().any(|existing| existing.id == rule.id) {
            return Err(RuleError::DuplicateId(rule.id));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Drop rules whose id or category name appears in `names`.
    pub fn without(mut self, names: &[String]) -> Self {
        self.rules.retain(|rule| {
            !names
                .iter()
                .any(|name| name == &rule.id || name == rule.category.as_str())
        });
        self
    }

    /// Switch every rule to exhaustive matching.
    pub fn exhaustive(mut self) -> Self {
        for rule in &mut self.rules {
            rule.match_mode = MatchMode::FindAll;
        }
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Give `word` the casing of `template` (all caps, capitalized or as-is).
pub fn match_case(template: &str, word: &str) -> String {
    let letters: Vec<char> = template.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        return word.to_uppercase();
    }
    match template.chars().next() {
        Some(first) if first.is_uppercase() => {
            let mut chars = word.chars();
            match chars.next() {
                Some(head) => head.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
        _ => word.to_string(),
    }
}

/// Replace the last whole-word occurrence of `from` (ASCII case-insensitive)
/// in `text` with `to`, keeping the original word's casing.
pub fn swap_word(text: &str, from: &str, to: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let is_word_char = |c: char| c.is_alphanumeric() || c == '\'';

    for (index, _) in lower.rmatch_indices(from) {
        let end = index + from.len();
        let before_ok = lower[..index].chars().next_back().map_or(true, |c| !is_word_char(c));
        let after_ok = lower[end..].chars().next().map_or(true, |c| !is_word_char(c));
        if before_ok && after_ok {
            let original = &text[index..end];
            return format!("{}{}{}", &text[..index], match_case(original, to), &text[end..]);
        }
    }

    text.to_string()
}

fn last_word(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .last()
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn singular_verb(matched: &str) -> Vec<String> {
    let replacement = if last_word(matched) == "were" { ("were", "was") } else { ("are", "is") };
    vec![swap_word(matched, replacement.0, replacement.1)]
}

fn plural_verb(matched: &str) -> Vec<String> {
    let replacement = if last_word(matched) == "was" { ("was", "were") } else { ("is", "are") };
    vec![swap_word(matched, replacement.0, replacement.1)]
}

fn first_person_verb(matched: &str) -> Vec<String> {
    let verb = last_word(matched);
    vec![swap_word(matched, &verb, "am")]
}

fn doesnt(matched: &str) -> Vec<String> {
    vec![swap_word(matched, "don't", "doesn't")]
}

fn your_to_youre(matched: &str) -> Vec<String> {
    vec![swap_word(matched, "your", "you're")]
}

fn its_to_it_is(matched: &str) -> Vec<String> {
    vec![swap_word(matched, "its", "it's")]
}

fn of_to_have(matched: &str) -> Vec<String> {
    vec![swap_word(matched, "of", "have")]
}

fn then_to_than(matched: &str) -> Vec<String> {
    vec![swap_word(matched, "then", "than")]
}

fn than_to_then(matched: &str) -> Vec<String> {
    vec![swap_word(matched, "than", "then")]
}

fn to_to_too(matched: &str) -> Vec<String> {
    vec![swap_word(matched, "to", "too")]
}

fn too_to_to(matched: &str) -> Vec<String> {
    vec![swap_word(matched, "too", "to")]
}

fn uppercase(matched: &str) -> Vec<String> {
    vec![matched.to_uppercase()]
}

fn trim_leading_space(matched: &str) -> Vec<String> {
    vec![matched.trim_start().to_string()]
}

/// `a,b` -> `a, b`; the mark is always the second char of the match.
fn space_after_mark(matched: &str) -> Vec<String> {
    match matched.char_indices().nth(2) {
        Some((split, _)) => vec![format!("{} {}", &matched[..split], &matched[split..])],
        None => Vec::new(),
    }
}

fn stronger_adjective(matched: &str) -> Vec<String> {
    let adjective = last_word(matched);
    let stronger = match adjective.as_str() {
        "good" => "excellent",
        "bad" => "terrible",
        "big" => "enormous",
        "small" => "tiny",
        "nice" => "wonderful",
        "pretty" => "beautiful",
        "ugly" => "hideous",
        "happy" => "delighted",
        "sad" => "miserable",
        "tired" => "exhausted",
        "scared" => "terrified",
        "cold" => "freezing",
        "hot" => "scorching",
        _ => return Vec::new(),
    };
    vec![match_case(matched, stronger)]
}
