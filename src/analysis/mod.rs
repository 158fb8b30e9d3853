//! Writing feedback built on top of the checker: vocabulary and sentence
//! structure, plus a per-kind tally of the checker's diagnostics.

pub mod sentences;
pub mod vocabulary;

use crate::checker::GrammarChecker;
use crate::{Diagnostic, DiagnosticKind};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use unicode_segmentation::UnicodeSegmentation;

pub use sentences::{analyze_sentences, SentenceAnalysis};
pub use vocabulary::{analyze_vocabulary, VocabularyAnalysis};

/// Texts shorter than this get placeholder feedback only.
pub const MIN_WORDS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    #[default]
    Narrative,
    Persuasive,
    Expository,
    Recount,
}

impl FromStr for TextType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "narrative" => Ok(TextType::Narrative),
            "persuasive" => Ok(TextType::Persuasive),
            "expository" | "informative" => Ok(TextType::Expository),
            "recount" => Ok(TextType::Recount),
            _ => Err(format!("Unknown text type: {}", s)),
        }
    }
}

impl fmt::Display for TextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextType::Narrative => write!(f, "narrative"),
            TextType::Persuasive => write!(f, "persuasive"),
            TextType::Expository => write!(f, "expository"),
            TextType::Recount => write!(f, "recount"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReport {
    pub text_type: TextType,
    pub word_count: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub counts: BTreeMap<String, usize>,
    pub vocabulary: VocabularyAnalysis,
    pub sentences: SentenceAnalysis,
}

impl FeedbackReport {
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.counts.get(kind.as_str()).copied().unwrap_or(0)
    }
}

/// Lowercased words, punctuation stripped.
pub(crate) fn words_of(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_lowercase).collect()
}

#[tracing::instrument(skip_all, fields(%text_type, len = text.len()))]
pub fn analyze(checker: &GrammarChecker, text: &str, text_type: TextType) -> FeedbackReport {
    let diagnostics = checker.check_text(text);

    let mut counts = BTreeMap::new();
    for diagnostic in &diagnostics {
        *counts.entry(diagnostic.kind.as_str().to_string()).or_insert(0) += 1;
    }

    FeedbackReport {
        text_type,
        word_count: words_of(text).len(),
        counts,
        vocabulary: analyze_vocabulary(text, text_type),
        sentences: analyze_sentences(text),
        diagnostics,
    }
}
