use serde::Serialize;

use crate::combiner::{classify_words, run, SandhiError};
use crate::grapheme::Category;
use crate::matcher::Advance;
use crate::rules::{Juncture, RuleKind, RuleSource, RuleTable};
use crate::settings::settings;

/// Full diagnostic result for one combination.
#[derive(Debug, Serialize)]
pub struct ExplainResult {
    pub words: Vec<String>,
    pub text: String,
    pub rule_version: u32,
    pub evaluations: usize,
    pub deletions: usize,
    pub boundaries: Vec<ExplainBoundary>,
}

/// One visited boundary, in pass order.
#[derive(Debug, Serialize)]
pub struct ExplainBoundary {
    pub left: String,
    pub left_category: Category,
    pub right: String,
    pub right_category: Category,
    pub lookahead: Option<String>,
    pub juncture: Juncture,
    pub kind: RuleKind,
    pub source: Option<RuleSource>,
    pub output: String,
    pub advance: Advance,
    pub sealed: bool,
}

/// Run the combination pass and record every boundary it visits.
pub fn explain<S: AsRef<str>>(
    table: &RuleTable,
    words: &[S],
) -> Result<ExplainResult, SandhiError> {
    let units = classify_words(words)?;
    let mut boundaries = Vec::new();
    let outcome = run(
        table,
        &units,
        &settings().combine.word_separator,
        &mut |b, r| {
            boundaries.push(ExplainBoundary {
                left: b.left.text().to_string(),
                left_category: b.left.category(),
                right: b.right.text().to_string(),
                right_category: b.right.category(),
                lookahead: b.lookahead.map(|g| g.text().to_string()),
                juncture: b.juncture,
                kind: r.kind,
                source: r.source,
                output: r.output.clone(),
                advance: r.advance,
                sealed: r.sealed,
            });
        },
    );

    Ok(ExplainResult {
        words: words.iter().map(|w| w.as_ref().to_string()).collect(),
        text: outcome.text,
        rule_version: table.version(),
        evaluations: outcome.evaluations,
        deletions: outcome.deletions,
        boundaries,
    })
}

/// Format an ExplainResult as human-readable text.
pub fn format_text(result: &ExplainResult) -> String {
    use unicode_width::UnicodeWidthStr;
    let mut out = String::new();

    out.push_str(&format!(
        "=== {} ({} words, rules {:08x}) ===\n",
        result.words.join(" + "),
        result.words.len(),
        result.rule_version,
    ));

    if result.boundaries.is_empty() {
        out.push_str("  No boundaries evaluated.\n");
    }
    for (i, b) in result.boundaries.iter().enumerate() {
        let pair = match &b.lookahead {
            Some(next) => format!("{} + {} ({})", b.left, b.right, next),
            None => format!("{} + {}", b.left, b.right),
        };
        let pad_width = 16;
        let display_width = UnicodeWidthStr::width(pair.as_str());
        let padded = if display_width < pad_width {
            format!("{}{}", pair, " ".repeat(pad_width - display_width))
        } else {
            pair
        };
        let source = b
            .source
            .map(|s| format!("{s:?}"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "  [{}] {} {:<16} {:<14} {:+} -> {}{}\n",
            i,
            padded,
            format!("{:?}", b.kind),
            source,
            b.advance.as_signed(),
            b.output,
            if b.sealed { "  (sealed)" } else { "" },
        ));
    }

    out.push_str(&format!(
        "\n  => {}  (evaluations={} deletions={})\n",
        result.text, result.evaluations, result.deletions,
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_basic() {
        let result = explain(RuleTable::global(), &["राम", "अर्जुनः"]).unwrap();
        assert_eq!(result.text, "रामार्जुनः");
        assert_eq!(result.boundaries.len(), 1);

        let b = &result.boundaries[0];
        assert_eq!(b.left, "म");
        assert_eq!(b.right, "अ");
        assert_eq!(b.lookahead.as_deref(), Some("र्"));
        assert_eq!(b.juncture, Juncture::Word);
        assert_eq!(b.kind, RuleKind::VowelCoalescence);
        assert_eq!(b.source, Some(RuleSource::VowelVowel));
        assert_eq!(b.advance, Advance::Two);
    }

    #[test]
    fn test_explain_deletion_reentry() {
        let result = explain(RuleTable::global(), &["सत्", "चित्"]).unwrap();
        let lefts: Vec<&str> = result.boundaries.iter().map(|b| b.left.as_str()).collect();
        assert_eq!(lefts, vec!["त्", "स"]);
        assert_eq!(result.boundaries[0].advance, Advance::Retreat);
        assert_eq!(result.deletions, 1);
    }

    #[test]
    fn test_explain_matches_combine() {
        let words = ["हरिः", "अपि"];
        let result = explain(RuleTable::global(), &words).unwrap();
        let outcome = crate::combiner::combine(&words).unwrap();
        assert_eq!(result.text, outcome.text);
        let kinds: Vec<RuleKind> = result.boundaries.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, outcome.rules);
    }

    #[test]
    fn test_explain_semivowel_conjunct_source() {
        for word in ["स्वागत", "स्वर", "द्वार", "अश्वः"] {
            let result = explain(RuleTable::global(), &[word]).unwrap();
            assert_eq!(result.text, word);
            let b = result
                .boundaries
                .iter()
                .find(|b| b.right_category == Category::Consonant && b.left.ends_with('्'))
                .unwrap();
            assert_eq!(b.source, Some(RuleSource::Lookahead), "{word}");
            assert_eq!(b.kind, RuleKind::Cluster);
        }

        let result = explain(RuleTable::global(), &["स्वागत"]).unwrap();
        let b = &result.boundaries[0];
        assert_eq!((b.left.as_str(), b.right.as_str()), ("स्", "वा"));
        assert_eq!(b.lookahead.as_deref(), Some("ग"));
    }

    #[test]
    fn test_explain_empty() {
        let none: [&str; 0] = [];
        assert!(explain(RuleTable::global(), &none).is_err());
    }

    #[test]
    fn test_format_text() {
        let result = explain(RuleTable::global(), &["रामः", "इति"]).unwrap();
        let text = format_text(&result);
        assert!(text.contains("रामः + इति"));
        assert!(text.contains("VisargaRule"));
        assert!(text.contains("(sealed)"));
        assert!(text.contains("=> राम इति"));
    }

    #[test]
    fn test_serialize_json_fields() {
        let result = explain(RuleTable::global(), &["तव", "छाया"]).unwrap();
        let b = &result.boundaries[0];
        assert_eq!(b.kind, RuleKind::Gemination);
        assert_eq!(b.source, Some(RuleSource::VowelConsonant));
        assert_eq!(b.left_category, Category::Consonant);
    }
}
