use super::*;
use crate::grapheme::classify;
use crate::matcher::Advance;
use crate::rules::RuleKind::*;

fn table() -> &'static RuleTable {
    RuleTable::global()
}

fn text(words: &[&str]) -> String {
    combine(words).unwrap().text
}

#[test]
fn vowel_coalescence_across_words() {
    let out = combine(&["राम", "अर्जुनः"]).unwrap();
    assert_eq!(out.text, "रामार्जुनः");
    assert_eq!(out.rules, vec![VowelCoalescence]);
    assert_eq!(out.evaluations, 1);
}

#[test]
fn empty_input_is_rejected() {
    let none: [&str; 0] = [];
    assert_eq!(combine(&none), Err(SandhiError::EmptyInput));
    assert_eq!(
        combine(&["राम", ""]),
        Err(SandhiError::EmptyWord { index: 1 })
    );
    assert_eq!(
        combine_graphemes(table(), &[]),
        Err(SandhiError::EmptyInput)
    );
}

#[test]
fn literal_override_in_a_word() {
    let out = combine_with(table(), &["पुत्र"]).unwrap();
    assert_eq!(out.text, "पुत्र");
    assert!(out.rules.contains(&Cluster));
}

#[test]
fn deletion_reevaluates_exposed_boundary() {
    let units = classify_words(&["सत्", "चित्"]).unwrap();
    let mut seen = Vec::new();
    let out = run(table(), &units, " ", &mut |b, r| {
        seen.push((
            b.left.text().to_string(),
            b.right.text().to_string(),
            r.kind,
            r.advance,
        ));
    });
    assert_eq!(
        seen,
        vec![
            ("त्".to_string(), "चि".to_string(), Deletion, Advance::Retreat),
            ("स".to_string(), "चि".to_string(), NoRule, Advance::One),
        ]
    );
    assert_eq!(out.text, "सचित्");
    assert_eq!(out.rules, vec![Deletion, NoRule]);
    assert_eq!(out.deletions, 1);
    assert_eq!(out.evaluations, 2);
}

#[test]
fn deletion_of_whole_word_keeps_separation() {
    let out = combine(&["क", "त्", "च"]).unwrap();
    assert_eq!(out.text, "क च");
    assert_eq!(out.deletions, 1);
    assert_eq!(out.evaluations, 3);
}

#[test]
fn deletion_at_sequence_start() {
    let out = combine_with(table(), &["त्च"]).unwrap();
    assert_eq!(out.text, "च");
    assert_eq!(out.deletions, 1);
}

#[test]
fn visarga_before_a_becomes_o() {
    let out = combine(&["रामः", "अत्र"]).unwrap();
    assert_eq!(out.text, "रामोऽत्र");
    assert_eq!(out.rules, vec![VisargaRule, VowelCoalescence]);
}

#[test]
fn visarga_hiatus_keeps_words_apart() {
    let out = combine(&["रामः", "इति"]).unwrap();
    assert_eq!(out.text, "राम इति");
    assert_eq!(out.rules, vec![VisargaRule, NoRule]);
    // The sealed boundary is not evaluated.
    assert_eq!(out.evaluations, 1);

    assert_eq!(text(&["बालाः", "गच्छन्ति"]), "बाला गच्छन्ति");
}

#[test]
fn visarga_becomes_r() {
    let out = combine(&["हरिः", "अपि"]).unwrap();
    assert_eq!(out.text, "हरिरपि");
    assert_eq!(out.rules, vec![VisargaRule, Cluster]);
}

#[test]
fn visarga_before_voiced_consonant() {
    assert_eq!(text(&["रामः", "गच्छति"]), "रामो गच्छति");
    assert_eq!(text(&["रामः", "च"]), "रामश्च");
}

#[test]
fn final_visarga_without_next_word_stays() {
    let out = combine(&["देव", "रामः"]).unwrap();
    assert_eq!(out.text, "देव रामः");
    assert_eq!(out.rules, vec![NoRule]);
}

#[test]
fn final_m_becomes_anusvara() {
    let out = combine(&["अहम्", "गच्छामि"]).unwrap();
    assert_eq!(out.text, "अहं गच्छामि");
    assert_eq!(out.rules, vec![Assimilation]);
}

#[test]
fn final_t_voices_before_vowel() {
    assert_eq!(text(&["जगत्", "ईशः"]), "जगदीशः");
    assert_eq!(text(&["वाक्", "ईशः"]), "वागीशः");
}

#[test]
fn short_vowel_doubles_chha() {
    let out = combine(&["तव", "छाया"]).unwrap();
    assert_eq!(out.text, "तवच्छाया");
    assert_eq!(out.rules, vec![Gemination]);
}

#[test]
fn three_words() {
    let out = combine(&["देव", "इन्द्रः", "अत्र"]).unwrap();
    assert_eq!(out.text, "देवेन्द्रोऽत्र");
    assert_eq!(out.rules, vec![VowelCoalescence, VisargaRule, VowelCoalescence]);
}

#[test]
fn no_rule_joins_with_separator() {
    let out = combine(&["hello", "world", "!"]).unwrap();
    assert_eq!(out.text, "hello world !");
    assert!(out.rules.iter().all(|k| *k == NoRule));
}

#[test]
fn single_word_evaluates_every_boundary() {
    let out = combine_with(table(), &["सत्य"]).unwrap();
    assert_eq!(out.text, "सत्य");
    assert_eq!(out.rules, vec![NoRule, Cluster]);

    // Word-scope rules do not fire inside a word.
    assert_eq!(combine_with(table(), &["पत्नी"]).unwrap().text, "पत्नी");
}

#[test]
fn combine_pair_matches_combine() {
    assert_eq!(
        combine_pair("राम", "अर्जुनः").unwrap(),
        combine(&["राम", "अर्जुनः"]).unwrap()
    );
}

#[test]
fn combine_graphemes_matches_combine() {
    let units: Vec<Vec<Grapheme>> = ["हरिः", "अपि"]
        .iter()
        .map(|w| classify(w).collect())
        .collect();
    assert_eq!(
        combine_graphemes(table(), &units).unwrap(),
        combine(&["हरिः", "अपि"]).unwrap()
    );
}

#[test]
fn compound_joins_without_space() {
    assert_eq!(
        join_compound(table(), &["देव", "आलय"]).unwrap().text,
        "देवालय"
    );
    assert_eq!(
        join_compound(table(), &["राम", "कथा"]).unwrap().text,
        "रामकथा"
    );
}

#[test]
fn repeated_calls_are_identical() {
    let words = ["सत्", "चित्", "आनन्दः"];
    assert_eq!(combine(&words).unwrap(), combine(&words).unwrap());
}

#[test]
fn word_final_visarga_records_two_boundaries() {
    let out = combine(&["रामः", "करोति"]).unwrap();
    assert_eq!(out.text, "रामः करोति");
    // म|ः then ः|क, both without a rule.
    assert_eq!(out.rules, vec![NoRule, NoRule]);
    assert_eq!(out.evaluations, 2);

    // Without the visarga there is only the word boundary.
    assert_eq!(combine(&["राम", "करोति"]).unwrap().rules.len(), 1);
}

#[test]
fn semivowel_conjuncts_in_real_words_are_kept() {
    for word in ["स्वागत", "द्वार", "अश्वः", "स्वर"] {
        assert_eq!(combine_with(table(), &[word]).unwrap().text, word);
    }
}

#[test]
fn dental_after_sha_turns_retroflex() {
    let out = combine_with(table(), &["विष्नुः"]).unwrap();
    assert_eq!(out.text, "विष्णुः");
    assert_eq!(out.rules[1], Cluster);
    assert_eq!(combine_with(table(), &["उष्नः"]).unwrap().text, "उष्णः");
    assert_eq!(
        join_compound(table(), &["इष्", "तम्"]).unwrap().text,
        "इष्टम्"
    );
    // No following unit: the plain cluster keeps the dental.
    assert_eq!(combine_with(table(), &["उष्न"]).unwrap().text, "उष्न");
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn shared_table_is_thread_safe() {
    assert_send_sync::<RuleTable>();
    assert_send_sync::<SandhiOutcome>();

    let inputs: [&[&str]; 4] = [
        &["देव", "इन्द्रः", "अत्र"],
        &["सत्", "चित्", "आनन्दः"],
        &["रामः", "करोति"],
        &["स्वागत"],
    ];
    let expected: Vec<SandhiOutcome> = inputs
        .iter()
        .map(|w| combine_with(RuleTable::global(), *w).unwrap())
        .collect();

    std::thread::scope(|s| {
        let workers: Vec<_> = (0..8)
            .map(|_| {
                s.spawn(|| {
                    (0..50)
                        .flat_map(|_| inputs.iter())
                        .map(|w| combine_with(RuleTable::global(), *w).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for worker in workers {
            let got = worker.join().unwrap();
            for (i, outcome) in got.iter().enumerate() {
                assert_eq!(outcome, &expected[i % inputs.len()]);
            }
        }
    });
}
