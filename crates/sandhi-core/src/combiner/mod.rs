//! Left-to-right combination of word sequences.
//!
//! With several words only the word boundaries are evaluated, plus the
//! boundary in front of a word-final visarga (whose rules depend on the
//! next word's initial). A single word is treated as a grapheme sequence
//! and every boundary inside it is evaluated.
//!
//! Each evaluated boundary either passes through, rewrites the left unit,
//! merges both units into a new left unit, or deletes the left unit. A
//! deletion pops the previously emitted unit back into place and evaluates
//! the boundary it now forms with the same right unit.

#[cfg(test)]
mod proptest_combine;
#[cfg(test)]
mod tests;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::grapheme::{classify, Category, Grapheme};
use crate::matcher::{match_boundary, Advance, Boundary, CombinationResult};
use crate::rules::{Juncture, RuleKind, RuleTable};
use crate::settings::settings;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SandhiError {
    #[error("no words to combine")]
    EmptyInput,
    #[error("word {index} is empty")]
    EmptyWord { index: usize },
}

/// The combined surface string and the rule applied at each boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SandhiOutcome {
    pub text: String,
    /// One entry per visited boundary, in pass order. A word-final visarga
    /// followed by another word is visited twice: once in front of the
    /// visarga and once at the word boundary itself. A deletion re-entry
    /// adds one more entry for the re-exposed boundary.
    pub rules: Vec<RuleKind>,
    /// Calls into the boundary matcher.
    pub evaluations: usize,
    /// Deletion re-entries.
    pub deletions: usize,
}

/// Combine words with the global rule table.
pub fn combine<S: AsRef<str>>(words: &[S]) -> Result<SandhiOutcome, SandhiError> {
    combine_with(RuleTable::global(), words)
}

pub fn combine_with<S: AsRef<str>>(
    table: &RuleTable,
    words: &[S],
) -> Result<SandhiOutcome, SandhiError> {
    let units = classify_words(words)?;
    Ok(run(
        table,
        &units,
        &settings().combine.word_separator,
        &mut |_, _| {},
    ))
}

/// Combine words that were already classified.
pub fn combine_graphemes(
    table: &RuleTable,
    words: &[Vec<Grapheme>],
) -> Result<SandhiOutcome, SandhiError> {
    check_units(words)?;
    Ok(run(
        table,
        words,
        &settings().combine.word_separator,
        &mut |_, _| {},
    ))
}

/// Two-word sandhi with the global rule table.
pub fn combine_pair(left: &str, right: &str) -> Result<SandhiOutcome, SandhiError> {
    combine(&[left, right])
}

/// Join compound members. Boundaries with no rule concatenate directly.
pub fn join_compound<S: AsRef<str>>(
    table: &RuleTable,
    stems: &[S],
) -> Result<SandhiOutcome, SandhiError> {
    let units = classify_words(stems)?;
    Ok(run(table, &units, "", &mut |_, _| {}))
}

pub(crate) fn classify_words<S: AsRef<str>>(
    words: &[S],
) -> Result<Vec<Vec<Grapheme>>, SandhiError> {
    let units: Vec<Vec<Grapheme>> = words
        .iter()
        .map(|w| classify(w.as_ref()).collect())
        .collect();
    check_units(&units)?;
    Ok(units)
}

fn check_units(words: &[Vec<Grapheme>]) -> Result<(), SandhiError> {
    if words.is_empty() {
        return Err(SandhiError::EmptyInput);
    }
    match words.iter().position(|w| w.is_empty()) {
        Some(index) => Err(SandhiError::EmptyWord { index }),
        None => Ok(()),
    }
}

enum Piece {
    Unit(Grapheme),
    Separator,
}

/// The combination pass. `words` must be non-empty with no empty word.
/// `observer` sees every boundary the pass visits, in order.
pub(crate) fn run(
    table: &RuleTable,
    words: &[Vec<Grapheme>],
    separator: &str,
    observer: &mut dyn FnMut(&Boundary<'_>, &CombinationResult),
) -> SandhiOutcome {
    let _span = debug_span!("combine", words = words.len()).entered();

    let single = words.len() == 1;
    // (unit, opens a word)
    let flat: Vec<(&Grapheme, bool)> = words
        .iter()
        .flat_map(|w| w.iter().enumerate().map(|(i, g)| (g, i == 0)))
        .collect();

    let mut pieces: Vec<Piece> = Vec::with_capacity(flat.len() + words.len());
    let mut rules = Vec::new();
    let mut evaluations = 0;
    let mut deletions = 0;

    let Some(&(first, _)) = flat.first() else {
        return SandhiOutcome {
            text: String::new(),
            rules,
            evaluations,
            deletions,
        };
    };
    let mut pending = first.clone();
    // The pending unit came from a hiatus-forming merge.
    let mut sealed = false;
    // The pending unit was re-exposed by a deletion and stays attached.
    let mut joined = false;
    let mut j = 1;

    while j < flat.len() {
        let (right, word_start) = flat[j];
        let visarga_edge = !single
            && right.category() == Category::Visarga
            && flat.get(j + 1).is_some_and(|&(_, starts)| starts);
        if !(single || word_start || visarga_edge) {
            pieces.push(Piece::Unit(std::mem::replace(&mut pending, right.clone())));
            sealed = false;
            joined = false;
            j += 1;
            continue;
        }

        let boundary = Boundary {
            left: &pending,
            right,
            lookahead: flat.get(j + 1).map(|&(g, _)| g),
            juncture: if word_start {
                Juncture::Word
            } else {
                Juncture::Internal
            },
        };
        let result = if sealed {
            CombinationResult::no_rule(&pending)
        } else {
            evaluations += 1;
            match_boundary(table, &boundary)
        };
        observer(&boundary, &result);
        rules.push(result.kind);

        let attached = joined;
        sealed = false;
        joined = false;
        match result.advance {
            Advance::One => {
                pieces.extend(classify(&result.output).map(Piece::Unit));
                if word_start && !attached {
                    pieces.push(Piece::Separator);
                }
                pending = right.clone();
                j += 1;
            }
            Advance::Two => {
                let mut merged: Vec<Grapheme> = classify(&result.output).collect();
                let last = merged.pop().unwrap_or_else(Grapheme::empty);
                pieces.extend(merged.into_iter().map(Piece::Unit));
                pending = last;
                sealed = result.sealed;
                j += 1;
            }
            Advance::Retreat => {
                deletions += 1;
                let crossed = matches!(pieces.last(), Some(Piece::Separator));
                if crossed {
                    pieces.pop();
                }
                match pieces.pop() {
                    Some(Piece::Unit(prev)) => {
                        debug!(deleted = pending.text(), exposed = prev.text(), "re-entry");
                        pending = prev;
                        joined = !crossed;
                    }
                    _ => {
                        pending = right.clone();
                        j += 1;
                    }
                }
            }
        }
    }
    pieces.push(Piece::Unit(pending));

    let text: String = pieces
        .iter()
        .map(|p| match p {
            Piece::Unit(g) => g.text(),
            Piece::Separator => separator,
        })
        .collect();
    debug!(%text, evaluations, deletions);
    SandhiOutcome {
        text,
        rules,
        evaluations,
        deletions,
    }
}
