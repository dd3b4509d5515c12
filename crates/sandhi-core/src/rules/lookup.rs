use serde::Serialize;

use crate::grapheme::{Category, Grapheme};
use crate::script::{self, VIRAMA};

use super::{pair_get, Juncture, RuleKind, RuleSource, RuleTable};

/// The text produced at a boundary.
///
/// When `valid` is true, `output` replaces both boundary units. When it is
/// false, `output` replaces the left unit only and the boundary stays open;
/// an empty `output` deletes the left unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transformation {
    pub output: String,
    pub valid: bool,
    /// The merged unit takes no further sandhi at its right edge.
    pub sealed: bool,
    pub kind: RuleKind,
    pub source: RuleSource,
}

impl Transformation {
    fn merged(output: String, kind: RuleKind, source: RuleSource) -> Self {
        Self {
            output,
            valid: true,
            sealed: false,
            kind,
            source,
        }
    }
}

impl RuleTable {
    /// Select the single transformation for a boundary, first match wins:
    /// literal overrides, look-ahead rules, then category rules
    /// (assimilation, vowel+consonant, cluster, gemination, vowel+vowel,
    /// deletion).
    pub fn lookup(
        &self,
        left: &Grapheme,
        right: &Grapheme,
        lookahead: Option<&Grapheme>,
        juncture: Juncture,
    ) -> Option<Transformation> {
        if left.is_other() || right.is_other() {
            return None;
        }
        if let Some(t) = self.literal(left, right) {
            return Some(t);
        }
        if let Some(next) = lookahead.filter(|g| !g.is_other()) {
            if let Some(t) = self
                .visarga(left, right, next)
                .or_else(|| self.dynamic_cluster(left, right))
            {
                return Some(t);
            }
        }
        self.assimilation(left, right, juncture)
            .or_else(|| self.vowel_consonant(left, right, juncture))
            .or_else(|| self.cluster(left, right))
            .or_else(|| self.gemination(left, right, juncture))
            .or_else(|| self.vowel_vowel(left, right))
            .or_else(|| self.deletion(left, right))
    }

    fn literal(&self, left: &Grapheme, right: &Grapheme) -> Option<Transformation> {
        let e = pair_get(&self.data.literal, left.text(), right.text())?;
        Some(Transformation::merged(
            e.output.clone(),
            e.kind,
            RuleSource::Literal,
        ))
    }

    /// Visarga between a vowel-final unit and the following word's initial.
    fn visarga(&self, left: &Grapheme, right: &Grapheme, next: &Grapheme) -> Option<Transformation> {
        if right.category() != Category::Visarga {
            return None;
        }
        let mut buf = [0u8; 4];
        let vowel: &str = left.final_vowel()?.encode_utf8(&mut buf);
        let row = self
            .data
            .visarga
            .iter()
            .find(|r| r.after.contains(vowel) && r.before.contains(next.initial()))?;

        let mut output = match &row.vowel {
            Some(v) => render_on(left, v),
            None => left.text().to_string(),
        };
        output.push_str(&row.append);
        Some(Transformation {
            output,
            valid: true,
            sealed: row.seal,
            kind: RuleKind::VisargaRule,
            source: RuleSource::Lookahead,
        })
    }

    /// Conjuncts that only form when the right consonant carries a vowel.
    /// In Devanagari that vowel is written on the right unit itself
    /// (`स्` + `वा`), so the right unit is tested, not the look-ahead.
    fn dynamic_cluster(&self, left: &Grapheme, right: &Grapheme) -> Option<Transformation> {
        if left.category() != Category::VirDeletedConsonant
            || right.category() != Category::Consonant
            || right.final_vowel().is_none()
        {
            return None;
        }
        let cluster = pair_get(&self.data.lookahead_clusters, left.text(), right.initial())?;
        Some(Transformation::merged(
            format!("{cluster}{}", right.trailing_marks()),
            RuleKind::Cluster,
            RuleSource::Lookahead,
        ))
    }

    fn assimilation(
        &self,
        left: &Grapheme,
        right: &Grapheme,
        juncture: Juncture,
    ) -> Option<Transformation> {
        if left.category() != Category::VirDeletedConsonant {
            return None;
        }
        let e = pair_get(&self.data.assimilation, left.text(), right.initial())?;
        if !juncture.admits(e.scope) {
            return None;
        }
        if e.merge {
            Some(Transformation::merged(
                attach(&e.output, right),
                e.kind,
                RuleSource::Assimilation,
            ))
        } else {
            Some(Transformation {
                output: e.output.clone(),
                valid: false,
                sealed: false,
                kind: e.kind,
                source: RuleSource::Assimilation,
            })
        }
    }

    fn vowel_consonant(
        &self,
        left: &Grapheme,
        right: &Grapheme,
        juncture: Juncture,
    ) -> Option<Transformation> {
        if !matches!(
            right.category(),
            Category::Consonant | Category::VirDeletedConsonant
        ) {
            return None;
        }
        let mut buf = [0u8; 4];
        let vowel: &str = left.final_vowel()?.encode_utf8(&mut buf);
        let e = pair_get(&self.data.vowel_consonant, vowel, right.initial())?;
        if !juncture.admits(e.scope) {
            return None;
        }
        Some(Transformation::merged(
            format!("{}{}{}", left.text(), e.output, right.text()),
            e.kind,
            RuleSource::VowelConsonant,
        ))
    }

    fn cluster(&self, left: &Grapheme, right: &Grapheme) -> Option<Transformation> {
        if left.category() != Category::VirDeletedConsonant {
            return None;
        }
        if !matches!(
            right.category(),
            Category::Consonant
                | Category::VirDeletedConsonant
                | Category::SimpleVowel
                | Category::DiphthongVowel
        ) {
            return None;
        }
        if pair_get(&self.data.cluster_exceptions, left.text(), right.initial()).is_some() {
            return None;
        }
        Some(Transformation::merged(
            attach(left.text(), right),
            RuleKind::Cluster,
            RuleSource::Cluster,
        ))
    }

    fn gemination(
        &self,
        left: &Grapheme,
        right: &Grapheme,
        juncture: Juncture,
    ) -> Option<Transformation> {
        if left.category() != Category::VirDeletedConsonant {
            return None;
        }
        let e = pair_get(&self.data.gemination, left.text(), right.initial())?;
        if !juncture.admits(e.scope) {
            return None;
        }
        Some(Transformation::merged(
            attach(&e.output, right),
            e.kind,
            RuleSource::Gemination,
        ))
    }

    fn vowel_vowel(&self, left: &Grapheme, right: &Grapheme) -> Option<Transformation> {
        if !right.category().is_vowel() {
            return None;
        }
        let mut buf = [0u8; 4];
        let vowel: &str = left.final_vowel()?.encode_utf8(&mut buf);
        let out = pair_get(&self.data.vowel_vowel, vowel, right.initial())?;
        Some(Transformation::merged(
            format!("{}{}", render_on(left, out), right.trailing_marks()),
            RuleKind::VowelCoalescence,
            RuleSource::VowelVowel,
        ))
    }

    /// Dental stop elided before a palatal, retroflex or dental obstruent.
    fn deletion(&self, left: &Grapheme, right: &Grapheme) -> Option<Transformation> {
        if left.category() != Category::VirDeletedConsonant {
            return None;
        }
        pair_get(&self.data.deletion, left.text(), right.initial())?;
        Some(Transformation {
            output: String::new(),
            valid: false,
            sealed: false,
            kind: RuleKind::Deletion,
            source: RuleSource::Deletion,
        })
    }
}

/// Write `replacement` in place of the final vowel of `left`.
///
/// A replacement opening with an independent vowel becomes that vowel's
/// sign on the consonant; one opening with a consonant is joined to the
/// consonant with a virama (yaṇ: दधि + अत्र → दध्यत्र).
fn render_on(left: &Grapheme, replacement: &str) -> String {
    let Some(base) = left.consonant_base() else {
        return replacement.to_string();
    };
    let mut chars = replacement.chars();
    match chars.next() {
        Some(v) if script::is_independent_vowel(v) => {
            let sign = script::vowel_sign(v).unwrap_or("");
            format!("{base}{sign}{}", chars.as_str())
        }
        Some(_) => format!("{base}{VIRAMA}{replacement}"),
        None => base.to_string(),
    }
}

/// Join a virama-final consonant to the following unit. A following
/// independent vowel becomes the consonant's vowel sign.
fn attach(consonant: &str, right: &Grapheme) -> String {
    match consonant.strip_suffix(VIRAMA) {
        Some(stem) if right.category().is_vowel() => {
            let sign = right
                .initial()
                .chars()
                .next()
                .and_then(script::vowel_sign)
                .unwrap_or("");
            format!("{stem}{sign}{}", right.trailing_marks())
        }
        _ => format!("{consonant}{}", right.text()),
    }
}
