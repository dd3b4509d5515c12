//! Property-based tests for the combination pass.

use proptest::prelude::*;

use super::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "अ", "आ", "इ", "उ", "ए", "ओ", "क", "का", "कि", "त्", "न्", "म्", "स्",
        "द्", "र", "व", "च", "छ", "ज", "य", "ह", "ः", "ं", "ल", "ट",
    ])
}

fn arb_word() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_fragment(), 1..6).prop_map(|parts| parts.concat())
}

fn arb_latin_word() -> impl Strategy<Value = String> {
    "[a-z0-9.,!?]{1,8}"
}

// ---------------------------------------------------------------------------
// proptest entry point
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn combine_is_deterministic(words in prop::collection::vec(arb_word(), 1..5)) {
        let a = combine(&words).unwrap();
        let b = combine(&words).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn evaluations_are_linear(words in prop::collection::vec(arb_word(), 1..5)) {
        let units = classify_words(&words).unwrap();
        let n: usize = units.iter().map(Vec::len).sum();
        let out = run(RuleTable::global(), &units, " ", &mut |_, _| {});
        prop_assert!(out.deletions <= n);
        prop_assert!(out.evaluations <= n + out.deletions);
    }

    #[test]
    fn other_words_pass_through(words in prop::collection::vec(arb_latin_word(), 1..5)) {
        let out = combine(&words).unwrap();
        prop_assert_eq!(out.text, words.join(" "));
        prop_assert!(out.rules.iter().all(|k| *k == RuleKind::NoRule));
        prop_assert_eq!(out.deletions, 0);
    }

    #[test]
    fn no_rule_boundaries_join_with_separator(
        words in prop::collection::vec(arb_word(), 2..5)
    ) {
        let out = combine(&words).unwrap();
        if out.rules.iter().all(|k| *k == RuleKind::NoRule) {
            prop_assert_eq!(out.text, words.join(" "));
        }
    }

    #[test]
    fn single_word_never_gains_a_separator(word in arb_word()) {
        let out = combine(&[word.as_str()]).unwrap();
        prop_assert!(!out.text.contains(' '));
    }
}
