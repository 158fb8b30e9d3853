use super::{words_of, MIN_WORDS};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

lazy_static! {
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]+").unwrap();
    static ref AND: Regex = Regex::new(r"(?i)\band\b").unwrap();
    static ref CONJUNCTION: Regex = Regex::new(r"(?i)\b(and|but|or|so|yet)\b").unwrap();
    static ref SUBORDINATOR: Regex =
        Regex::new(r"(?i)\b(because|although|while|when|if|since|unless|after|before)\b").unwrap();
}

/// Openers counted when looking for repetitive sentence starts.
const STARTERS: &[&str] = &["the", "i", "it", "he", "she", "they", "we", "there", "this", "that"];

const TOO_SHORT: usize = 4;
const TOO_LONG: usize = 30;
const EXCERPT_CHARS: usize = 50;
const MAX_ISSUES: usize = 5;
const MAX_SUGGESTIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceShape {
    Simple,
    Compound,
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    TooShort,
    TooLong,
    RunOn,
    RepetitiveStarts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceIssue {
    pub kind: IssueKind,
    pub sentence: String,
    pub suggestion: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShapeCounts {
    pub simple: usize,
    pub compound: usize,
    pub complex: usize,
}

impl ShapeCounts {
    fn record(&mut self, shape: SentenceShape) {
        match shape {
            SentenceShape::Simple => self.simple += 1,
            SentenceShape::Compound => self.compound += 1,
            SentenceShape::Complex => self.complex += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceAnalysis {
    pub total_sentences: usize,
    /// Words per sentence, rounded to one decimal.
    pub average_length: f64,
    pub shapes: ShapeCounts,
    pub variety_score: u8,
    pub variety_feedback: String,
    pub issues: Vec<SentenceIssue>,
    pub strengths: Vec<&'static str>,
    pub suggestions: Vec<&'static str>,
}

impl SentenceAnalysis {
    fn empty(feedback: String) -> Self {
        Self {
            total_sentences: 0,
            average_length: 0.0,
            shapes: ShapeCounts::default(),
            variety_score: 0,
            variety_feedback: feedback,
            issues: Vec::new(),
            strengths: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}

pub fn classify(sentence: &str) -> SentenceShape {
    let clauses = sentence.split(',').count();
    if SUBORDINATOR.is_match(sentence) || clauses > 2 {
        SentenceShape::Complex
    } else if CONJUNCTION.is_match(sentence) {
        SentenceShape::Compound
    } else {
        SentenceShape::Simple
    }
}

fn is_run_on(sentence: &str) -> bool {
    let ands = AND.find_iter(sentence).count();
    let commas = sentence.matches(',').count();
    ands >= 3 || (commas >= 4 && !sentence.contains("because") && !sentence.contains("although"))
}

fn excerpt(sentence: &str) -> String {
    match sentence.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &sentence[..cut]),
        None => sentence.to_string(),
    }
}

pub fn analyze_sentences(text: &str) -> SentenceAnalysis {
    if words_of(text).len() < MIN_WORDS {
        return SentenceAnalysis::empty(format!(
            "Keep writing! Sentence analysis will appear after {} words.",
            MIN_WORDS
        ));
    }

    let sentences: Vec<&str> = SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.is_empty() {
        return SentenceAnalysis::empty("No complete sentences detected yet.".to_string());
    }

    let total = sentences.len();
    let mut lengths = Vec::with_capacity(total);
    let mut shapes = ShapeCounts::default();
    let mut issues = Vec::new();
    let mut starters: BTreeMap<String, usize> = BTreeMap::new();

    for sentence in &sentences {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        lengths.push(words.len());

        if words.len() < TOO_SHORT {
            issues.push(SentenceIssue {
                kind: IssueKind::TooShort,
                sentence: excerpt(sentence),
                suggestion: "This sentence is very short. Try adding more detail or combining it with another sentence.",
            });
        } else if words.len() > TOO_LONG {
            issues.push(SentenceIssue {
                kind: IssueKind::TooLong,
                sentence: excerpt(sentence),
                suggestion: "This sentence is quite long. Consider breaking it into two sentences for clarity.",
            });
        }

        if is_run_on(sentence) {
            issues.push(SentenceIssue {
                kind: IssueKind::RunOn,
                sentence: excerpt(sentence),
                suggestion: "This might be a run-on sentence. Try using periods or semicolons to separate ideas.",
            });
        }

        shapes.record(classify(sentence));

        if let Some(first) = words.first() {
            let first = first.to_lowercase();
            if STARTERS.contains(&first.as_str()) {
                *starters.entry(first).or_insert(0) += 1;
            }
        }
    }

    if total >= 5 {
        for (starter, count) in &starters {
            if *count >= 3 {
                issues.push(SentenceIssue {
                    kind: IssueKind::RepetitiveStarts,
                    sentence: format!(
                        "\"{}\" appears at the start of {} sentences",
                        crate::checker::rules::match_case("Xx", starter),
                        count
                    ),
                    suggestion: "Try varying your sentence beginnings. Use different words or phrases to start sentences.",
                });
            }
        }
    }

    let average = lengths.iter().sum::<usize>() as f64 / total as f64;
    let spread = lengths.iter().max().unwrap_or(&0) - lengths.iter().min().unwrap_or(&0);
    let variety_score = variety_score(&shapes, total, spread);

    let mut strengths = Vec::new();
    if shapes.complex as f64 >= total as f64 * 0.2 {
        strengths.push("Good use of complex sentences");
    }
    if (12.0..=20.0).contains(&average) {
        strengths.push("Sentences are well-balanced in length");
    }
    if shapes.compound as f64 >= total as f64 * 0.2 {
        strengths.push("Effective use of compound sentences");
    }
    if spread > 10 {
        strengths.push("Good variety in sentence length");
    }

    let mut suggestions = Vec::new();
    if shapes.simple as f64 > total as f64 * 0.7 {
        suggestions.push(
            "Try combining some simple sentences with \"and,\" \"but,\" or \"because\"",
        );
    }
    if (shapes.complex as f64) < total as f64 * 0.1 && total >= 5 {
        suggestions.push(
            "Add complex sentences using words like \"because,\" \"although,\" or \"when\"",
        );
    }
    if average < 8.0 {
        suggestions.push("Your sentences are quite short. Try adding more descriptive details");
    }
    if average > 22.0 {
        suggestions.push("Some sentences are very long. Break them up for better readability");
    }
    if starters.len() <= 2 && total >= 5 {
        suggestions.push(
            "Vary how you begin sentences. Try starting with descriptive words or phrases",
        );
    }

    issues.truncate(MAX_ISSUES);
    suggestions.truncate(MAX_SUGGESTIONS);

    tracing::debug!(total, variety_score, issues = issues.len(), "sentence analysis complete");

    SentenceAnalysis {
        total_sentences: total,
        average_length: (average * 10.0).round() / 10.0,
        shapes,
        variety_score,
        variety_feedback: variety_feedback(variety_score).to_string(),
        issues,
        strengths,
        suggestions,
    }
}

fn variety_score(shapes: &ShapeCounts, total: usize, spread: usize) -> u8 {
    let share = |n: usize| n as f64 * 100.0 / total as f64;
    let dominant = share(shapes.simple)
        .max(share(shapes.compound))
        .max(share(shapes.complex));

    let mut score = 0;
    if dominant < 70.0 {
        score += 2;
    } else if dominant < 85.0 {
        score += 1;
    }

    if shapes.simple > 0 && shapes.compound > 0 && shapes.complex > 0 {
        score += 2;
    } else if shapes.simple > 0 && (shapes.compound > 0 || shapes.complex > 0) {
        score += 1;
    }

    if spread > 10 {
        score += 1;
    }

    score.min(5)
}

fn variety_feedback(score: u8) -> &'static str {
    match score {
        4..=5 => "Excellent sentence variety! You're using different structures effectively.",
        3 => "Good variety. Try adding more complex sentences for sophistication.",
        2 => "Mix up your sentence structures more. Use simple, compound, and complex sentences.",
        _ => "Your sentences are too similar. Try varying length and structure.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_not_analyzed() {
        let analysis = analyze_sentences("The cat sat on the mat.");
        assert_eq!(analysis.total_sentences, 0);
        assert!(analysis.variety_feedback.contains("50 words"));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("The dog ran home"), SentenceShape::Simple);
        assert_eq!(classify("The dog ran home and the cat slept"), SentenceShape::Compound);
        assert_eq!(classify("The dog ran home because it was cold"), SentenceShape::Complex);
        assert_eq!(classify("Apples, pears, plums"), SentenceShape::Complex);
    }

    #[test]
    fn test_run_on_detection() {
        assert!(is_run_on("We ran and jumped and laughed and sang"));
        assert!(is_run_on("red, blue, green, pink, gold"));
        assert!(!is_run_on("red, blue, green, pink, gold because we liked them"));
        assert!(!is_run_on("We ran and jumped"));
    }

    #[test]
    fn test_excerpt_cuts_long_sentences() {
        let long = "a".repeat(60);
        assert_eq!(excerpt(&long), format!("{}...", "a".repeat(50)));
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_repetitive_simple_writing() {
        // 12 sentences of 5 words each
        let text = "The dog ran to school. ".repeat(12);
        let analysis = analyze_sentences(&text);

        assert_eq!(analysis.total_sentences, 12);
        assert_eq!(analysis.average_length, 5.0);
        assert_eq!(analysis.shapes.simple, 12);
        assert_eq!(analysis.variety_score, 0);
        assert!(analysis.issues.iter().any(|i| {
            i.kind == IssueKind::RepetitiveStarts && i.sentence.starts_with("\"The\" appears")
        }));
        assert!(analysis.suggestions.len() <= MAX_SUGGESTIONS);
        assert!(analysis.suggestions[0].contains("combining"));
    }

    #[test]
    fn test_varied_writing_scores_higher() {
        let text = "Rain fell. \
            The river rose quickly and the village prepared for the worst. \
            Because the bridge was old, the mayor closed it before nightfall arrived in the valley. \
            Families gathered their belongings, packed the carts, and moved up the hill together. \
            By morning the water had reached the square, but nobody was hurt at all. \
            Children watched from the hillside while their parents counted the damage below them.";
        let analysis = analyze_sentences(text);

        assert_eq!(analysis.total_sentences, 6);
        assert!(analysis.shapes.simple > 0);
        assert!(analysis.shapes.compound > 0);
        assert!(analysis.shapes.complex > 0);
        assert!(analysis.variety_score >= 4);
        assert!(analysis.issues.iter().any(|i| i.kind == IssueKind::TooShort));
    }
}
