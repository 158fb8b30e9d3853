use super::{words_of, TextType, MIN_WORDS};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sophistication {
    Basic,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyCategory {
    Descriptive,
    Emotion,
    Action,
    Transition,
    Dialogue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularySuggestion {
    pub word: &'static str,
    pub replaces: Option<&'static str>,
    pub definition: &'static str,
    pub example: &'static str,
    pub level: Sophistication,
    pub category: VocabularyCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyAnalysis {
    pub word_count: usize,
    pub unique_words: usize,
    pub sophisticated_words: Vec<String>,
    pub overused_words: Vec<WordCount>,
    pub suggestions: Vec<VocabularySuggestion>,
    /// 0 to 5.
    pub score: u8,
    pub feedback: String,
}

const SOPHISTICATED: &[(VocabularyCategory, &[&str])] = &[
    (
        VocabularyCategory::Descriptive,
        &[
            "magnificent",
            "peculiar",
            "immense",
            "delicate",
            "ancient",
            "vibrant",
            "luminous",
            "majestic",
            "serene",
            "ominous",
        ],
    ),
    (
        VocabularyCategory::Emotion,
        &[
            "anxious",
            "elated",
            "devastated",
            "bewildered",
            "thrilled",
            "distraught",
            "content",
            "furious",
            "melancholy",
            "exhilarated",
        ],
    ),
    (
        VocabularyCategory::Action,
        &[
            "sprinted",
            "whispered",
            "observed",
            "contemplated",
            "investigated",
            "emerged",
            "vanished",
            "ascended",
            "descended",
            "persevered",
        ],
    ),
    (
        VocabularyCategory::Transition,
        &[
            "meanwhile",
            "subsequently",
            "nevertheless",
            "consequently",
            "furthermore",
            "alternatively",
            "ultimately",
            "initially",
            "eventually",
            "suddenly",
        ],
    ),
    (
        VocabularyCategory::Dialogue,
        &[
            "exclaimed",
            "murmured",
            "insisted",
            "responded",
            "declared",
            "announced",
            "admitted",
            "protested",
            "suggested",
            "questioned",
        ],
    ),
];

/// Frequent words that don't count as overused.
const FILLER: &[&str] = &[
    "that", "this", "then", "what", "when", "where", "they", "their", "there", "with",
];

const fn upgrade(
    replaces: &'static str,
    word: &'static str,
    definition: &'static str,
    example: &'static str,
    level: Sophistication,
    category: VocabularyCategory,
) -> VocabularySuggestion {
    VocabularySuggestion {
        word,
        replaces: Some(replaces),
        definition,
        example,
        level,
        category,
    }
}

/// Stronger alternatives for weak words, in the order they are checked.
const UPGRADES: &[VocabularySuggestion] = &[
    upgrade(
        "said",
        "whispered",
        "To speak very softly or quietly",
        "\"I have a secret,\" she whispered to her friend.",
        Sophistication::Intermediate,
        VocabularyCategory::Dialogue,
    ),
    upgrade(
        "said",
        "exclaimed",
        "To cry out suddenly or with strong emotion",
        "\"What an amazing discovery!\" he exclaimed.",
        Sophistication::Intermediate,
        VocabularyCategory::Dialogue,
    ),
    upgrade(
        "said",
        "murmured",
        "To speak in a low, soft voice",
        "\"I'm not sure,\" she murmured thoughtfully.",
        Sophistication::Advanced,
        VocabularyCategory::Dialogue,
    ),
    upgrade(
        "went",
        "sprinted",
        "To run at full speed for a short distance",
        "The athlete sprinted towards the finish line.",
        Sophistication::Intermediate,
        VocabularyCategory::Action,
    ),
    upgrade(
        "went",
        "wandered",
        "To walk slowly without a clear direction",
        "She wandered through the mysterious forest.",
        Sophistication::Intermediate,
        VocabularyCategory::Action,
    ),
    upgrade(
        "went",
        "ventured",
        "To go somewhere despite risks or uncertainty",
        "They ventured into the dark cave.",
        Sophistication::Advanced,
        VocabularyCategory::Action,
    ),
    upgrade(
        "big",
        "immense",
        "Extremely large or great",
        "The immense building towered over the street.",
        Sophistication::Intermediate,
        VocabularyCategory::Descriptive,
    ),
    upgrade(
        "big",
        "colossal",
        "Extraordinarily large",
        "A colossal wave crashed against the shore.",
        Sophistication::Advanced,
        VocabularyCategory::Descriptive,
    ),
    upgrade(
        "small",
        "tiny",
        "Very small",
        "A tiny mouse scurried across the floor.",
        Sophistication::Basic,
        VocabularyCategory::Descriptive,
    ),
    upgrade(
        "small",
        "minuscule",
        "Extremely small",
        "The minuscule details were barely visible.",
        Sophistication::Advanced,
        VocabularyCategory::Descriptive,
    ),
    upgrade(
        "good",
        "excellent",
        "Extremely good; outstanding",
        "She received excellent marks on her test.",
        Sophistication::Intermediate,
        VocabularyCategory::Descriptive,
    ),
    upgrade(
        "good",
        "magnificent",
        "Extremely beautiful or impressive",
        "The magnificent sunset painted the sky orange.",
        Sophistication::Advanced,
        VocabularyCategory::Descriptive,
    ),
    upgrade(
        "bad",
        "terrible",
        "Extremely bad or serious",
        "The storm caused terrible damage.",
        Sophistication::Intermediate,
        VocabularyCategory::Descriptive,
    ),
    upgrade(
        "bad",
        "dreadful",
        "Very bad or unpleasant",
        "The dreadful weather kept everyone inside.",
        Sophistication::Advanced,
        VocabularyCategory::Descriptive,
    ),
    upgrade(
        "happy",
        "delighted",
        "Very pleased",
        "She was delighted with her birthday present.",
        Sophistication::Intermediate,
        VocabularyCategory::Emotion,
    ),
    upgrade(
        "happy",
        "elated",
        "Extremely happy and excited",
        "He was elated when he won the competition.",
        Sophistication::Advanced,
        VocabularyCategory::Emotion,
    ),
    upgrade(
        "sad",
        "miserable",
        "Very unhappy",
        "She felt miserable after losing her pet.",
        Sophistication::Intermediate,
        VocabularyCategory::Emotion,
    ),
    upgrade(
        "sad",
        "melancholy",
        "A feeling of thoughtful sadness",
        "A melancholy mood settled over the room.",
        Sophistication::Advanced,
        VocabularyCategory::Emotion,
    ),
];

const NARRATIVE_EXTRAS: &[VocabularySuggestion] = &[
    VocabularySuggestion {
        word: "mysterious",
        replaces: None,
        definition: "Difficult to understand or explain; strange",
        example: "A mysterious figure appeared in the shadows.",
        level: Sophistication::Intermediate,
        category: VocabularyCategory::Descriptive,
    },
    VocabularySuggestion {
        word: "hesitated",
        replaces: None,
        definition: "Paused before saying or doing something",
        example: "She hesitated before opening the door.",
        level: Sophistication::Intermediate,
        category: VocabularyCategory::Action,
    },
];

const MAX_PER_WEAK_WORD: usize = 2;
const MAX_SUGGESTIONS: usize = 6;
const MAX_OVERUSED: usize = 5;

pub fn analyze_vocabulary(text: &str, text_type: TextType) -> VocabularyAnalysis {
    let words = words_of(text);
    let word_count = words.len();

    if word_count < MIN_WORDS {
        return VocabularyAnalysis {
            word_count,
            unique_words: 0,
            sophisticated_words: Vec::new(),
            overused_words: Vec::new(),
            suggestions: Vec::new(),
            score: 0,
            feedback: format!(
                "Keep writing! Vocabulary suggestions will appear after {} words.",
                MIN_WORDS
            ),
        };
    }

    let unique_words = words
        .iter()
        .filter(|w| w.chars().count() > 3)
        .collect::<HashSet<_>>()
        .len();

    let mut sophisticated_words: Vec<String> = Vec::new();
    for word in &words {
        let known = SOPHISTICATED
            .iter()
            .any(|(_, list)| list.contains(&word.as_str()));
        if known && !sophisticated_words.contains(word) {
            sophisticated_words.push(word.clone());
        }
    }

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for word in &words {
        if word.chars().count() > 3 && !FILLER.contains(&word.as_str()) {
            *frequency.entry(word.as_str()).or_insert(0) += 1;
        }
    }
    let mut overused_words: Vec<WordCount> = frequency
        .into_iter()
        .filter(|(_, count)| *count >= 3)
        .map(|(word, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect();
    overused_words.sort_by(|a, b| b.count.cmp(&a.count).then(a.word.cmp(&b.word)));
    overused_words.truncate(MAX_OVERUSED);

    let present: HashSet<&str> = words.iter().map(String::as_str).collect();
    let mut suggestions: Vec<VocabularySuggestion> = Vec::new();
    let mut per_word: HashMap<&str, usize> = HashMap::new();
    for upgrade in UPGRADES {
        let Some(weak) = upgrade.replaces else { continue };
        let taken = per_word.entry(weak).or_insert(0);
        if present.contains(weak) && *taken < MAX_PER_WEAK_WORD {
            suggestions.push(upgrade.clone());
            *taken += 1;
        }
    }

    if text_type == TextType::Narrative && suggestions.len() < 5 {
        for extra in NARRATIVE_EXTRAS {
            if !suggestions.iter().any(|s| s.word == extra.word) {
                suggestions.push(extra.clone());
            }
        }
    }
    suggestions.truncate(MAX_SUGGESTIONS);

    let score = vocabulary_score(
        unique_words,
        word_count,
        sophisticated_words.len(),
        overused_words.is_empty(),
    );

    VocabularyAnalysis {
        word_count,
        unique_words,
        sophisticated_words,
        overused_words,
        suggestions,
        score,
        feedback: feedback_for(score).to_string(),
    }
}

fn vocabulary_score(unique: usize, total: usize, sophisticated: usize, no_overuse: bool) -> u8 {
    let diversity = unique as f64 / total as f64;
    let sophistication = sophisticated as f64 / (total as f64 / MIN_WORDS as f64);

    let mut score = 0;
    if diversity > 0.7 {
        score += 2;
    } else if diversity > 0.5 {
        score += 1;
    }

    if sophistication > 0.8 {
        score += 2;
    } else if sophistication > 0.4 {
        score += 1;
    }

    if no_overuse {
        score += 1;
    }

    score.min(5)
}

fn feedback_for(score: u8) -> &'static str {
    match score {
        4..=5 => "Excellent vocabulary! You're using varied and sophisticated words.",
        3 => "Good vocabulary variety. Try adding more descriptive words.",
        2 => "Your vocabulary is developing. Use the suggestions below to enhance your writing.",
        _ => "Let's expand your vocabulary! Try replacing simple words with more specific ones.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat(sentence: &str, times: usize) -> String {
        vec![sentence; times].join(" ")
    }

    #[test]
    fn test_short_text_gets_minimal_analysis() {
        let analysis = analyze_vocabulary("The dog said hello.", TextType::Narrative);
        assert_eq!(analysis.word_count, 4);
        assert_eq!(analysis.score, 0);
        assert!(analysis.suggestions.is_empty());
        assert!(analysis.feedback.contains("50 words"));
    }

    #[test]
    fn test_weak_words_get_upgrades() {
        let text = repeat("The big dog said it was a good day to play outside.", 6);
        let analysis = analyze_vocabulary(&text, TextType::Persuasive);

        let replaced: Vec<_> = analysis.suggestions.iter().filter_map(|s| s.replaces).collect();
        assert_eq!(replaced, vec!["said", "said", "big", "big", "good", "good"]);
        assert!(analysis.suggestions.len() <= MAX_SUGGESTIONS);
    }

    #[test]
    fn test_overused_and_sophisticated_words() {
        let text = format!(
            "{} The magnificent castle was ominous.",
            repeat("The dragon flew over the castle and the dragon roared.", 5)
        );
        let analysis = analyze_vocabulary(&text, TextType::Narrative);

        assert_eq!(analysis.overused_words[0].word, "dragon");
        assert_eq!(analysis.overused_words[0].count, 10);
        assert_eq!(analysis.sophisticated_words, vec!["magnificent", "ominous"]);
        // narrative writing gets the extra suggestions
        assert!(analysis.suggestions.iter().any(|s| s.word == "mysterious"));
    }

    #[test]
    fn test_score_bounds() {
        assert_eq!(vocabulary_score(90, 100, 10, true), 5);
        assert_eq!(vocabulary_score(10, 100, 0, false), 0);
        assert_eq!(vocabulary_score(60, 100, 0, true), 2);
    }
}
