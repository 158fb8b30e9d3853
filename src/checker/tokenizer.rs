use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ASCII letter runs with internal apostrophes; runs glued to digits or
    // other word characters fail the boundary and are skipped whole
    static ref WORD: Regex = Regex::new(r"\b[A-Za-z]+(?:['’][A-Za-z]+)*\b").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl Token<'_> {
    /// Lowercase form with typographic apostrophes folded to `'`.
    pub fn normalized(&self) -> String {
        self.text.replace('’', "'").to_lowercase()
    }
}

/// Split text into word tokens with byte offsets.
pub fn words(text: &str) -> Vec<Token<'_>> {
    WORD.find_iter(text)
        .map(|m| Token {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<&str> {
        words(text).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_word_offsets() {
        let tokens = words("I will recieve it.");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[2].text, "recieve");
        assert_eq!((tokens[2].start, tokens[2].end), (7, 14));
    }

    #[test]
    fn test_contractions_stay_whole() {
        assert_eq!(texts("Don't stop, it’s fine"), vec!["Don't", "stop", "it’s", "fine"]);
        assert_eq!(words("it’s")[0].normalized(), "it's");
    }

    #[test]
    fn test_mixed_tokens_are_skipped() {
        assert_eq!(texts("abc123 café ok"), vec!["ok"]);
    }
}
