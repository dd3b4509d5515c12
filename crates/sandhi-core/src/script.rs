//! Character-level classification for Devanagari text.

pub const VIRAMA: char = '\u{094D}';
pub const VISARGA: char = '\u{0903}';
pub const ANUSVARA: char = '\u{0902}';
pub const CANDRABINDU: char = '\u{0901}';
pub const NUKTA: char = '\u{093C}';
pub const AVAGRAHA: char = '\u{093D}';

/// Independent vowels that never coalesce into a diphthong on their own:
/// अ आ इ ई उ ऊ ऋ ॠ ऌ ॡ.
pub fn is_simple_vowel(c: char) -> bool {
    matches!(
        c,
        'अ' | 'आ' | 'इ' | 'ई' | 'उ' | 'ऊ' | 'ऋ' | 'ॠ' | 'ऌ' | 'ॡ'
    )
}

pub fn is_diphthong(c: char) -> bool {
    matches!(c, 'ए' | 'ऐ' | 'ओ' | 'औ')
}

pub fn is_independent_vowel(c: char) -> bool {
    is_simple_vowel(c) || is_diphthong(c)
}

/// Consonant letters क..ह (U+0915..U+0939) plus the precomposed nukta
/// letters (U+0958..U+095F).
pub fn is_consonant(c: char) -> bool {
    ('\u{0915}'..='\u{0939}').contains(&c) || ('\u{0958}'..='\u{095F}').contains(&c)
}

/// Dependent vowel signs that attach to a preceding consonant.
pub fn is_vowel_sign(c: char) -> bool {
    ('\u{093E}'..='\u{094C}').contains(&c) || c == '\u{0962}' || c == '\u{0963}'
}

pub fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

/// The vowel sign that writes `vowel` after a consonant.
///
/// Returns `Some("")` for अ, which is carried by the consonant itself.
pub fn vowel_sign(vowel: char) -> Option<&'static str> {
    let sign = match vowel {
        'अ' => "",
        'आ' => "\u{093E}",
        'इ' => "\u{093F}",
        'ई' => "\u{0940}",
        'उ' => "\u{0941}",
        'ऊ' => "\u{0942}",
        'ऋ' => "\u{0943}",
        'ॠ' => "\u{0944}",
        'ऌ' => "\u{0962}",
        'ॡ' => "\u{0963}",
        'ए' => "\u{0947}",
        'ऐ' => "\u{0948}",
        'ओ' => "\u{094B}",
        'औ' => "\u{094C}",
        _ => return None,
    };
    Some(sign)
}

/// Inverse of [`vowel_sign`]: the independent vowel a sign stands for.
pub fn vowel_of_sign(sign: char) -> Option<char> {
    let vowel = match sign {
        '\u{093E}' => 'आ',
        '\u{093F}' => 'इ',
        '\u{0940}' => 'ई',
        '\u{0941}' => 'उ',
        '\u{0942}' => 'ऊ',
        '\u{0943}' => 'ऋ',
        '\u{0944}' => 'ॠ',
        '\u{0962}' => 'ऌ',
        '\u{0963}' => 'ॡ',
        '\u{0947}' => 'ए',
        '\u{0948}' => 'ऐ',
        '\u{094B}' => 'ओ',
        '\u{094C}' => 'औ',
        _ => return None,
    };
    Some(vowel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowel_classes() {
        assert!(is_simple_vowel('अ'));
        assert!(is_simple_vowel('ॡ'));
        assert!(!is_simple_vowel('ए'));
        assert!(is_diphthong('औ'));
        assert!(is_independent_vowel('ऋ'));
        assert!(!is_independent_vowel('क'));
    }

    #[test]
    fn test_consonant_range() {
        assert!(is_consonant('क'));
        assert!(is_consonant('ह'));
        assert!(is_consonant('\u{095B}'));
        assert!(!is_consonant('अ'));
        assert!(!is_consonant(VIRAMA));
        assert!(!is_consonant('a'));
    }

    #[test]
    fn test_vowel_sign_roundtrip() {
        for v in ['आ', 'इ', 'ई', 'उ', 'ऊ', 'ऋ', 'ॠ', 'ए', 'ऐ', 'ओ', 'औ'] {
            let sign = vowel_sign(v).unwrap();
            let c = sign.chars().next().unwrap();
            assert!(is_vowel_sign(c), "{v} sign not recognised");
            assert_eq!(vowel_of_sign(c), Some(v));
        }
        assert_eq!(vowel_sign('अ'), Some(""));
        assert_eq!(vowel_sign('क'), None);
    }
}
