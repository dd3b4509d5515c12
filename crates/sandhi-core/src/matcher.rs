//! Rule selection at a single boundary.

use serde::Serialize;
use tracing::trace;

use crate::grapheme::Grapheme;
use crate::rules::{Juncture, RuleKind, RuleSource, RuleTable};

/// The units on either side of one merge attempt.
#[derive(Debug, Clone, Copy)]
pub struct Boundary<'a> {
    pub left: &'a Grapheme,
    pub right: &'a Grapheme,
    pub lookahead: Option<&'a Grapheme>,
    pub juncture: Juncture,
}

/// How far the combiner moves after a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advance {
    /// The left unit is final (possibly rewritten); move to the right unit.
    One,
    /// Both units were consumed into the output, which becomes the new left.
    Two,
    /// The left unit was deleted; re-evaluate the unit before it against
    /// the right unit.
    Retreat,
}

impl Advance {
    pub fn as_signed(self) -> i8 {
        match self {
            Advance::One => 1,
            Advance::Two => 2,
            Advance::Retreat => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinationResult {
    pub output: String,
    pub kind: RuleKind,
    pub source: Option<RuleSource>,
    pub advance: Advance,
    /// The merged unit must not combine with what follows.
    pub sealed: bool,
}

impl CombinationResult {
    pub(crate) fn no_rule(left: &Grapheme) -> Self {
        Self {
            output: left.text().to_string(),
            kind: RuleKind::NoRule,
            source: None,
            advance: Advance::One,
            sealed: false,
        }
    }
}

pub fn match_boundary(table: &RuleTable, boundary: &Boundary<'_>) -> CombinationResult {
    let Boundary {
        left,
        right,
        lookahead,
        juncture,
    } = *boundary;
    if left.is_other() || right.is_other() {
        return CombinationResult::no_rule(left);
    }

    let Some(t) = table.lookup(left, right, lookahead, juncture) else {
        return CombinationResult::no_rule(left);
    };
    let advance = if t.valid {
        Advance::Two
    } else if t.output.is_empty() {
        Advance::Retreat
    } else {
        Advance::One
    };
    trace!(left = left.text(), right = right.text(), kind = ?t.kind, output = %t.output);
    CombinationResult {
        output: t.output,
        kind: t.kind,
        source: Some(t.source),
        advance,
        sealed: t.sealed,
    }
}
