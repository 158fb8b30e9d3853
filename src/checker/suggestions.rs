use crate::checker::dictionary::Dictionary;

/// Candidates beyond this edit distance are too dissimilar to offer.
pub const MAX_EDIT_DISTANCE: usize = 2;
/// Candidates scoring at or below this are dropped.
pub const MIN_SCORE: u32 = 50;
/// How many ranked candidates survive before the quality floor.
const SHORTLIST: usize = 5;
/// How many suggestions are returned.
pub const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub word: String,
    pub distance: usize,
    pub score: u32,
}

/// Rank dictionary words close to `word` and return the best few.
///
/// Scans the whole dictionary, which is fine for a list of about a thousand
/// words; a larger list would need an index (BK-tree, n-grams) instead.
pub fn generate(word: &str, dictionary: &Dictionary) -> Vec<String> {
    rank(word, dictionary)
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|candidate| candidate.word)
        .collect()
}

/// Scored candidates in ranking order, already cut to the shortlist and the
/// quality floor.
pub fn rank(word: &str, dictionary: &Dictionary) -> Vec<Candidate> {
    let word = word.to_lowercase();
    let word_len = word.chars().count();
    let mut candidates = Vec::new();

    dictionary.for_each_word(|known| {
        // Pre-filter by length: a larger gap can't be within the distance limit
        let known_len = known.chars().count();
        if known_len.abs_diff(word_len) > MAX_EDIT_DISTANCE {
            return;
        }

        let distance = edit_distance(&word, known);
        if distance == 0 || distance > MAX_EDIT_DISTANCE {
            return;
        }

        candidates.push(Candidate {
            word: known.to_string(),
            distance,
            score: score(&word, known, distance),
        });
    });

    // Stable sort keeps dictionary order for full ties
    candidates.sort_by(|a, b| b.score.cmp(&a.score).then(a.distance.cmp(&b.distance)));
    candidates.truncate(SHORTLIST);
    candidates.retain(|candidate| candidate.score > MIN_SCORE);
    candidates
}

/// Composite similarity score for a candidate within the distance limit.
fn score(word: &str, candidate: &str, distance: usize) -> u32 {
    let mut score = 0;

    if word.chars().next() == candidate.chars().next() {
        score += 100;
    }

    score += (3 - distance.min(3) as u32) * 50;

    if word.chars().count().abs_diff(candidate.chars().count()) <= 1 {
        score += 30;
    }

    let same_position = word
        .chars()
        .zip(candidate.chars())
        .filter(|(a, b)| a == b)
        .count() as u32;
    score += same_position * 10;

    score
}

/// Calculate Levenshtein distance between two strings
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two rows of the classic matrix are enough
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };

            current[j + 1] = std::cmp::min(
                std::cmp::min(
                    previous[j + 1] + 1, // deletion
                    current[j] + 1,      // insertion
                ),
                previous[j] + cost, // substitution
            );
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("hello", "hello"), 0);
        assert_eq!(edit_distance("hello", "hallo"), 1);
        assert_eq!(edit_distance("hello", "hullo"), 1);
        assert_eq!(edit_distance("hello", "world"), 4);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        // a transposition costs two edits
        assert_eq!(edit_distance("becuase", "because"), 2);
    }

    #[test]
    fn test_score_components() {
        // first letter, distance 1, same length, "ca_" and "_t" line up
        assert_eq!(score("cst", "cat", 1), 100 + 100 + 30 + 20);
        // no shared first letter, distance 2, length differs by 2
        assert_eq!(score("qrs", "abqrs", 2), 50);
    }

    #[test]
    fn test_ranking_order() {
        let dict = Dictionary::from_words(["cat", "car", "cart", "dog"]).unwrap();
        let ranked = rank("cst", &dict);
        let words: Vec<_> = ranked.iter().map(|c| c.word.as_str()).collect();

        // car and cart tie on score and distance, so dictionary order decides
        assert_eq!(words, vec!["cat", "car", "cart"]);
        assert_eq!(ranked[0].distance, 1);
        assert_eq!(ranked[0].score, 250);
    }

    #[test]
    fn test_quality_floor() {
        let dict = Dictionary::from_words(["abqrs"]).unwrap();
        assert!(generate("qrs", &dict).is_empty());
    }

    #[test]
    fn test_distance_limit() {
        let dict = Dictionary::from_words(["elephant"]).unwrap();
        assert!(generate("elefnt", &dict).is_empty());
    }

    #[test]
    fn test_at_most_three_suggestions() {
        let dict = Dictionary::from_words(["bat", "cat", "hat", "mat", "rat", "sat"]).unwrap();
        let suggestions = generate("zat", &dict);
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn test_embedded_dictionary_suggestion() {
        let dict = Dictionary::embedded().unwrap();
        let suggestions = generate("hapy", &dict);
        assert_eq!(suggestions.first().map(String::as_str), Some("happy"));
    }
}
