use writecoach::checker::rules::RuleCategory;
use writecoach::lint::{apply_edits, Linter};
use writecoach::{Diagnostic, DiagnosticKind, GrammarChecker};

const COMPARATIVES: &[&str] = &[
    "better", "worse", "more", "less", "greater", "smaller", "higher", "lower", "faster",
    "slower", "bigger", "older", "younger", "taller", "shorter", "stronger", "weaker", "richer",
    "poorer", "happier", "sadder", "easier", "harder",
];

const CORPUS: &[&str] = &[
    "",
    "The result is better then expected.",
    "First we eat, than we play.",
    "i think their going to recieve it , maybe.",
    "He are late.She are early!",
    "We ran home. the dog barked. the cat slept.",
    "Café owners naïvely recieve crêpes, then leave.",
    "It was a very good day and alot of fun.",
    "Line one\nline two\n\n  third line with wierd spelling",
];

#[test]
fn test_spans_are_valid_slices() {
    let checker = GrammarChecker::new().unwrap();
    for text in CORPUS {
        for diagnostic in checker.check_text(text) {
            assert!(diagnostic.start <= diagnostic.end, "{:?}", diagnostic);
            assert!(diagnostic.end <= text.len(), "{:?}", diagnostic);
            assert!(text.is_char_boundary(diagnostic.start));
            assert!(text.is_char_boundary(diagnostic.end));
        }
    }
}

#[test]
fn test_output_is_sorted_and_repeatable() {
    let checker = GrammarChecker::new().unwrap();
    for text in CORPUS {
        let first = checker.check_text(text);
        assert!(first.windows(2).all(|w| w[0].start <= w[1].start));
        assert_eq!(first, checker.check_text(text));
    }
}

#[test]
fn test_spelling_errors_have_suggestions_and_unknown_words() {
    let checker = GrammarChecker::new().unwrap();
    for text in CORPUS {
        for error in checker.check_spelling(text) {
            assert!(!error.suggestions.is_empty());
            let mapped = checker
                .dictionary()
                .misspelling(&error.word.to_lowercase())
                .is_some();
            assert!(error.suggestions.len() <= 3 || mapped);
            assert!(!checker.dictionary().contains(&error.word.to_lowercase()));
            assert_eq!(&text[error.start..error.end], error.word);
        }
    }
}

#[test]
fn test_than_then_pair() {
    let checker = GrammarChecker::new().unwrap();

    let flagged = checker.check_text("The result is better then expected.");
    assert_eq!(flagged.len(), 1);
    assert!(flagged[0].message.contains("than"));

    assert!(checker.check_text("The result is better than expected.").is_empty());
    assert!(checker.check_text("First we eat, then we play.").is_empty());

    let sequence = checker.check_text("First we eat, than we play.");
    assert_eq!(sequence.len(), 1);
    assert!(sequence[0].message.contains("'then'"));
}

#[test]
fn test_multibyte_text_keeps_byte_offsets() {
    let checker = GrammarChecker::new().unwrap();
    let text = "Café owners recieve it.";
    let spelling: Vec<_> = checker
        .check_text(text)
        .into_iter()
        .filter(|d| d.kind == DiagnosticKind::Spelling && d.excerpt(text) == "recieve")
        .collect();
    assert_eq!(spelling.len(), 1);
    assert_eq!(spelling[0].start, "Café owners ".len());
}

#[test]
fn test_fixing_removes_single_problem() {
    let checker = GrammarChecker::new().unwrap();
    let linter = Linter::new(&checker);

    for text in ["The result is better then expected.", "I will recieve it."] {
        let (fixed, applied) = apply_edits(text, &linter.fixes(text)).unwrap();
        assert_eq!(applied, 1);
        assert!(checker.check_text(&fixed).is_empty(), "{}", fixed);
    }
}

fn than_then(checker: &GrammarChecker, text: &str) -> Vec<Diagnostic> {
    checker
        .check_grammar(text)
        .into_iter()
        .filter(|d| {
            checker
                .rules()
                .get(&d.rule_id)
                .map_or(false, |rule| rule.category == RuleCategory::ThanThen)
        })
        .collect()
}

#[test]
fn test_correct_than_is_clean() {
    let checker = GrammarChecker::new().unwrap();
    for text in [
        "This is better than that.",
        "She is taller than her brother.",
        "I like apples more than oranges.",
        "The car is faster than the bike.",
        "He is older than me.",
        "This book is easier than the last one.",
        "My house is bigger than yours.",
        "She runs faster than I do.",
        "Today is worse than yesterday.",
        "I would rather go swimming than hiking.",
        "She is happier than she was before.",
        "This test is harder than the practice one.",
    ] {
        assert!(than_then(&checker, text).is_empty(), "{}", text);
    }
}

#[test]
fn test_correct_then_is_clean() {
    let checker = GrammarChecker::new().unwrap();
    for text in [
        "First we eat, then we play.",
        "I went to the store, and then I came home.",
        "Back then, things were different.",
        "Since then, I have improved.",
        "We will go now and then later.",
        "Next, then finally.",
        "If you study, then you will pass.",
    ] {
        assert!(than_then(&checker, text).is_empty(), "{}", text);
    }
}

#[test]
fn test_then_for_than_is_flagged() {
    let checker = GrammarChecker::new().unwrap();
    for (text, flagged) in [
        ("This is better then that.", "better then"),
        ("She is taller then her brother.", "taller then"),
        ("I like apples more then oranges.", "more then"),
        ("He is older then me.", "older then"),
        ("I would rather go swimming then hiking.", "rather go swimming then"),
        ("I would rather go to school then stay home.", "rather go to school then"),
    ] {
        let diagnostics = than_then(&checker, text);
        assert!(!diagnostics.is_empty(), "{}", text);
        assert_eq!(diagnostics[0].excerpt(text), flagged);
        assert!(diagnostics[0].message.contains("comparison"));
    }
}

#[test]
fn test_than_for_then_is_flagged() {
    let checker = GrammarChecker::new().unwrap();
    for (text, flagged, suggestion) in [
        ("First we eat, than we play.", "than", "then"),
        ("I went to the store, and than I came home.", "and than", "and then"),
        ("Since than, I have improved.", "Since than", "Since then"),
        ("Next than finally.", "Next than", "Next then"),
    ] {
        let diagnostics = than_then(&checker, text);
        assert_eq!(diagnostics.len(), 1, "{}", text);
        assert_eq!(diagnostics[0].excerpt(text), flagged);
        assert_eq!(diagnostics[0].suggestions, vec![suggestion]);
        assert!(diagnostics[0].message.contains("time sequence"));
    }
}

#[test]
fn test_than_then_in_longer_text() {
    let checker = GrammarChecker::new().unwrap();

    let clean = "This is better than that, and then we went home. She is taller than me.";
    assert!(than_then(&checker, clean).is_empty());

    let mixed = "This is better then that. First we eat, then we play.";
    let diagnostics = than_then(&checker, mixed);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("'than'"));

    let shouting = "This is BETTER THEN that.";
    let diagnostics = than_then(&checker, shouting);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].suggestions, vec!["BETTER THAN"]);

    let long = "First of all the weather was nice and the sun was warm, than it rained.";
    let diagnostics = than_then(&checker, long);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].excerpt(long), "than");
}

#[test]
fn test_every_comparative() {
    let checker = GrammarChecker::new().unwrap();
    for comparative in COMPARATIVES {
        let wrong = format!("The result is {} then expected.", comparative);
        let diagnostics = than_then(&checker, &wrong);
        assert!(!diagnostics.is_empty(), "{}", wrong);
        assert!(diagnostics[0].suggestions[0].ends_with(" than"), "{}", wrong);

        let right = format!("The result is {} than expected.", comparative);
        assert!(than_then(&checker, &right).is_empty(), "{}", right);
    }
}

#[test]
fn test_built_in_words_are_never_misspelled() {
    let checker = GrammarChecker::new().unwrap();
    let mut words = Vec::new();
    checker.dictionary().for_each_word(|word| words.push(word.to_string()));
    assert!(words.len() > 1000);

    for word in &words {
        let mut capitalized = word.clone();
        capitalized[..1].make_ascii_uppercase();

        for form in [word.as_str(), capitalized.as_str()] {
            assert!(checker.check_spelling(form).is_empty(), "{}", form);
        }
    }
}
