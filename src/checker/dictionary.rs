use anyhow::{Context, Result};
use fst::{Set, Streamer};
use std::collections::{BTreeSet, HashMap};

const COMMON_WORDS: &str = include_str!("../../data/common_words.txt");

/// Frequent misspellings with their canonical corrections.
const MISSPELLINGS: &[(&str, &[&str])] = &[
    ("recieve", &["receive"]),
    ("seperate", &["separate"]),
    ("definately", &["definitely"]),
    ("occured", &["occurred"]),
    ("begining", &["beginning"]),
    ("writting", &["writing"]),
    ("grammer", &["grammar"]),
    ("speach", &["speech"]),
    ("acheive", &["achieve"]),
    ("beleive", &["believe"]),
    ("freind", &["friend"]),
    ("freinds", &["friends"]),
    ("wierd", &["weird"]),
    ("neccessary", &["necessary"]),
    ("accomodate", &["accommodate"]),
    ("embarass", &["embarrass"]),
    ("existance", &["existence"]),
    ("maintainance", &["maintenance"]),
    ("occassion", &["occasion"]),
    ("priviledge", &["privilege"]),
    ("recomend", &["recommend"]),
    ("rythm", &["rhythm"]),
    ("tommorrow", &["tomorrow"]),
    ("tommorow", &["tomorrow"]),
    ("untill", &["until"]),
    ("wether", &["whether", "weather"]),
    ("alot", &["a lot"]),
    ("becuase", &["because"]),
    ("beautifull", &["beautiful"]),
    ("suprise", &["surprise"]),
    ("thier", &["their"]),
    ("truely", &["truly"]),
    ("arguement", &["argument"]),
    ("calender", &["calendar"]),
    ("finaly", &["finally"]),
    ("goverment", &["government"]),
    ("happend", &["happened"]),
    ("independant", &["independent"]),
    ("knowlege", &["knowledge"]),
    ("libary", &["library"]),
    ("noticable", &["noticeable"]),
    ("persue", &["pursue"]),
    ("realy", &["really"]),
    ("sincerly", &["sincerely"]),
    ("threshhold", &["threshold"]),
    ("cant", &["can't"]),
    ("dont", &["don't"]),
    ("wont", &["won't"]),
    ("shouldnt", &["shouldn't"]),
    ("couldnt", &["couldn't"]),
    ("wouldnt", &["wouldn't"]),
    ("isnt", &["isn't"]),
    ("arent", &["aren't"]),
    ("wasnt", &["wasn't"]),
    ("werent", &["weren't"]),
    ("hasnt", &["hasn't"]),
    ("havent", &["haven't"]),
    ("hadnt", &["hadn't"]),
    ("didnt", &["didn't"]),
    ("doesnt", &["doesn't"]),
];

/// Known-good words plus the exact misspelling map.
///
/// Built once; lookups expect lowercase input.
pub struct Dictionary {
    set: Set<Vec<u8>>,
    misspellings: HashMap<String, Vec<String>>,
}

impl Dictionary {
    /// The built-in word list and misspelling map.
    pub fn embedded() -> Result<Self> {
        let words = parse_word_list(COMMON_WORDS);
        let misspellings = MISSPELLINGS
            .iter()
            .map(|(wrong, right)| {
                (
                    wrong.to_string(),
                    right.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();

        Self::build(words, misspellings).context("Failed to build embedded dictionary")
    }

    /// Dictionary over an arbitrary word list, with no misspelling map.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self::build(words, HashMap::new())
    }

    fn build(words: BTreeSet<String>, misspellings: HashMap<String, Vec<String>>) -> Result<Self> {
        // fst needs keys in lexicographic order; BTreeSet iterates that way
        let set = Set::from_iter(words.iter()).context("Failed to build word set")?;
        Ok(Self { set, misspellings })
    }

    /// Check if word exists in dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    /// Exact corrections for a known misspelling.
    pub fn misspelling(&self, word: &str) -> Option<&[String]> {
        self.misspellings.get(word).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Visit every known word in lexicographic order.
    pub fn for_each_word(&self, mut visit: impl FnMut(&str)) {
        let mut stream = self.set.stream();
        while let Some(key) = stream.next() {
            if let Ok(word) = std::str::from_utf8(key) {
                visit(word);
            }
        }
    }
}

fn parse_word_list(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_dictionary() {
        let dict = Dictionary::embedded().unwrap();
        assert!(dict.len() >= 1000);
        assert!(dict.contains("the"));
        assert!(dict.contains("because"));
        assert!(dict.contains("don't"));
        assert!(!dict.contains("recieve"));
    }

    #[test]
    fn test_misspellings_are_not_known_words() {
        let dict = Dictionary::embedded().unwrap();
        for (wrong, _) in MISSPELLINGS {
            assert!(!dict.contains(wrong), "{wrong} is both known and misspelled");
        }
        assert_eq!(dict.misspelling("recieve"), Some(&["receive".to_string()][..]));
        assert_eq!(dict.misspelling("receive"), None);
    }

    #[test]
    fn test_from_words_normalises_and_orders() {
        let dict = Dictionary::from_words(["World", "hello", " ", "hello"]).unwrap();
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("world"));

        let mut seen = Vec::new();
        dict.for_each_word(|w| seen.push(w.to_string()));
        assert_eq!(seen, vec!["hello", "world"]);
    }

    #[test]
    fn test_parse_word_list_skips_comments() {
        let words = parse_word_list("# header\nthe cat\n\n  sat  ");
        assert_eq!(words.len(), 3);
        assert!(!words.contains("#"));
    }
}
