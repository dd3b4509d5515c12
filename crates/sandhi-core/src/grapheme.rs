//! Segmentation of Devanagari text into tagged orthographic units.
//!
//! `classify` walks the input once and yields one `Grapheme` per vowel,
//! consonant (with its attached vowel sign, nukta, or virama), visarga,
//! or anusvara. Anything else passes through as `Category::Other`, so the
//! concatenated grapheme texts always reproduce the input exactly.

use serde::Serialize;

use crate::script::{self, ANUSVARA, CANDRABINDU, NUKTA, VIRAMA, VISARGA};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SimpleVowel,
    DiphthongVowel,
    Consonant,
    Visarga,
    Anusvara,
    VirDeletedConsonant,
    Other,
}

impl Category {
    pub fn is_vowel(self) -> bool {
        matches!(self, Category::SimpleVowel | Category::DiphthongVowel)
    }
}

/// One classified orthographic unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grapheme {
    text: String,
    category: Category,
    bears_inherent_vowel: bool,
}

impl Grapheme {
    /// Classify a single unit of text. Text spanning several units is
    /// tagged by its first unit; use [`classify`] to segment.
    pub fn new(text: &str) -> Self {
        classify(text).next().unwrap_or_else(Self::empty)
    }

    /// A zero-width hard boundary; never combines with anything.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            category: Category::Other,
            bears_inherent_vowel: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn bears_inherent_vowel(&self) -> bool {
        self.bears_inherent_vowel
    }

    pub fn is_other(&self) -> bool {
        self.category == Category::Other
    }

    /// The leading letter: the consonant for consonant units, the vowel for
    /// vowel units, the sign itself otherwise.
    pub fn initial(&self) -> &str {
        match self.text.chars().next() {
            Some(c) => &self.text[..c.len_utf8()],
            None => "",
        }
    }

    /// The vowel this unit ends in, written as an independent vowel.
    /// A bare consonant ends in the inherent अ.
    pub fn final_vowel(&self) -> Option<char> {
        match self.category {
            Category::SimpleVowel | Category::DiphthongVowel => self.text.chars().next(),
            Category::Consonant if self.bears_inherent_vowel => Some('अ'),
            Category::Consonant => self.text.chars().find_map(script::vowel_of_sign),
            _ => None,
        }
    }

    /// The consonant letter plus nukta, without vowel sign or candrabindu.
    pub fn consonant_base(&self) -> Option<&str> {
        if self.category != Category::Consonant {
            return None;
        }
        let end = self
            .text
            .char_indices()
            .find(|&(i, c)| i > 0 && c != NUKTA)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        Some(&self.text[..end])
    }

    /// Text following the leading letter (vowel sign, candrabindu, ...).
    pub fn trailing_marks(&self) -> &str {
        &self.text[self.initial().len()..]
    }
}

/// Lazy segmentation over a borrowed string. Clone it to replay the
/// remaining units, or call [`classify`] again for a fresh pass.
#[derive(Debug, Clone)]
pub struct Graphemes<'a> {
    text: &'a str,
    pos: usize,
}

pub fn classify(text: &str) -> Graphemes<'_> {
    Graphemes { text, pos: 0 }
}

impl<'a> Graphemes<'a> {
    fn peek(&self, offset: usize) -> Option<char> {
        self.text[offset..].chars().next()
    }

    /// Advance `end` past `c` if it is the next char.
    fn absorb(&self, end: &mut usize, pred: impl Fn(char) -> bool) -> Option<char> {
        match self.peek(*end) {
            Some(c) if pred(c) => {
                *end += c.len_utf8();
                Some(c)
            }
            _ => None,
        }
    }
}

impl Iterator for Graphemes<'_> {
    type Item = Grapheme;

    fn next(&mut self) -> Option<Grapheme> {
        let start = self.pos;
        let c = self.peek(start)?;
        let mut end = start + c.len_utf8();

        let (category, bears_inherent_vowel) = if script::is_consonant(c) {
            self.absorb(&mut end, |n| n == NUKTA);
            if self.absorb(&mut end, |n| n == VIRAMA).is_some() {
                (Category::VirDeletedConsonant, false)
            } else if self.absorb(&mut end, script::is_vowel_sign).is_some() {
                self.absorb(&mut end, |n| n == CANDRABINDU);
                (Category::Consonant, false)
            } else {
                self.absorb(&mut end, |n| n == CANDRABINDU);
                (Category::Consonant, true)
            }
        } else if script::is_simple_vowel(c) {
            self.absorb(&mut end, |n| n == CANDRABINDU);
            (Category::SimpleVowel, false)
        } else if script::is_diphthong(c) {
            self.absorb(&mut end, |n| n == CANDRABINDU);
            (Category::DiphthongVowel, false)
        } else if c == VISARGA {
            (Category::Visarga, false)
        } else if c == ANUSVARA {
            (Category::Anusvara, false)
        } else {
            (Category::Other, false)
        };

        self.pos = end;
        Some(Grapheme {
            text: self.text[start..end].to_string(),
            category,
            bears_inherent_vowel,
        })
    }
}

/// A written syllable: leading conjunct consonants, the vowel-bearing
/// unit, and any following anusvara or visarga.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Syllable {
    pub text: String,
    /// True when the syllable opens with an independent vowel.
    pub is_vowel: bool,
}

/// Group a word into syllables. Trailing virama consonants (जगत्) close
/// the preceding syllable; unclassified characters stand alone.
pub fn syllables(text: &str) -> Vec<Syllable> {
    let mut out: Vec<Syllable> = Vec::new();
    let mut onset = String::new();
    // Whether the last syllable may still take anusvara/visarga/coda.
    let mut open = false;

    for g in classify(text) {
        match g.category() {
            Category::VirDeletedConsonant => onset.push_str(g.text()),
            Category::Consonant | Category::SimpleVowel | Category::DiphthongVowel => {
                let is_vowel = onset.is_empty() && g.category().is_vowel();
                onset.push_str(g.text());
                out.push(Syllable {
                    text: std::mem::take(&mut onset),
                    is_vowel,
                });
                open = true;
            }
            Category::Anusvara | Category::Visarga if open && onset.is_empty() => {
                if let Some(last) = out.last_mut() {
                    last.text.push_str(g.text());
                }
            }
            _ => {
                flush_coda(&mut out, &mut onset, open);
                out.push(Syllable {
                    text: g.text().to_string(),
                    is_vowel: false,
                });
                open = false;
            }
        }
    }
    flush_coda(&mut out, &mut onset, open);
    out
}

fn flush_coda(out: &mut Vec<Syllable>, onset: &mut String, open: bool) {
    if onset.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if open => last.text.push_str(onset),
        _ => out.push(Syllable {
            text: onset.clone(),
            is_vowel: false,
        }),
    }
    onset.clear();
}
