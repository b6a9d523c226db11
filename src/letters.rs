//! Letter classification tables.
//!
//! Maps 1-2 character tokens to their phonetic category, placement band and
//! decoration. The group memberships encode the script's design and are
//! matched case-insensitively. Every function returns `None` (or `false`)
//! for text outside its category instead of failing; callers combine the
//! categories to test overall validity.

use crate::types::{ConsonantDecoration, ConsonantPlacement, VocalDecoration, VocalPlacement};
use once_cell::sync::Lazy;
use regex::Regex;

static VOCAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)[aeiou]$").expect("valid vocal regex"));

static DEEP_CUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(b|ch|d|g|h|f)$").expect("valid deep cut regex"));
static INSIDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(j|ph|k|l|c|n|p|m)$").expect("valid inside regex"));
static SHALLOW_CUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(t|wh|sh|r|v|w|s)$").expect("valid shallow cut regex"));
static ON_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(th|gh|y|z|q|qu|x|ng)$").expect("valid on line regex"));

static NO_DECORATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(b|j|t|th)$").expect("valid no decoration regex"));
static SINGLE_DOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(ph|wh|gh)$").expect("valid single dot regex"));
static DOUBLE_DOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(ch|k|sh|y)$").expect("valid double dot regex"));
static TRIPLE_DOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(d|l|r|z)$").expect("valid triple dot regex"));
static QUADRUPLE_DOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(c|q)$").expect("valid quadruple dot regex"));
static SINGLE_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(g|n|v|qu)$").expect("valid single line regex"));
static DOUBLE_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(h|p|w|x)$").expect("valid double line regex"));
static TRIPLE_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(f|m|s|ng)$").expect("valid triple line regex"));

static VOCAL_ON_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)[eiu]$").expect("valid vocal on line regex"));
static VOCAL_OUTSIDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)a$").expect("valid vocal outside regex"));
static VOCAL_INSIDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)o$").expect("valid vocal inside regex"));

static VOCAL_NO_DECORATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)[aeo]$").expect("valid vocal no decoration regex"));
static VOCAL_LINE_INSIDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)i$").expect("valid vocal line inside regex"));
static VOCAL_LINE_OUTSIDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)u$").expect("valid vocal line outside regex"));

static DOUBLE_LETTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(th|ph|wh|gh|ch|sh|qu|ng)$").expect("valid double letter regex"));

/// The phonetic category of a valid letter token, with its placement band
/// and decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A vowel glyph
    Vocal {
        /// Radial band relative to the parent circle
        placement: VocalPlacement,
        /// Line ornamentation
        decoration: VocalDecoration,
    },
    /// A consonant glyph
    Consonant {
        /// Radial band relative to the word circle
        placement: ConsonantPlacement,
        /// Dot or line ornamentation
        decoration: ConsonantDecoration,
    },
}

/// Whether the token is a vowel.
pub fn is_vocal(token: &str) -> bool {
    VOCAL_RE.is_match(token)
}

/// Whether the token is a two-character digraph.
pub fn is_double_letter(token: &str) -> bool {
    DOUBLE_LETTER_RE.is_match(token)
}

/// The placement band of a consonant token, or `None` for non-consonants.
pub fn consonant_placement(token: &str) -> Option<ConsonantPlacement> {
    if DEEP_CUT_RE.is_match(token) {
        Some(ConsonantPlacement::DeepCut)
    } else if INSIDE_RE.is_match(token) {
        Some(ConsonantPlacement::Inside)
    } else if SHALLOW_CUT_RE.is_match(token) {
        Some(ConsonantPlacement::ShallowCut)
    } else if ON_LINE_RE.is_match(token) {
        Some(ConsonantPlacement::OnLine)
    } else {
        None
    }
}

/// The decoration of a consonant token, or `None` for non-consonants.
pub fn consonant_decoration(token: &str) -> Option<ConsonantDecoration> {
    if NO_DECORATION_RE.is_match(token) {
        Some(ConsonantDecoration::None)
    } else if SINGLE_DOT_RE.is_match(token) {
        Some(ConsonantDecoration::SingleDot)
    } else if DOUBLE_DOT_RE.is_match(token) {
        Some(ConsonantDecoration::DoubleDot)
    } else if TRIPLE_DOT_RE.is_match(token) {
        Some(ConsonantDecoration::TripleDot)
    } else if QUADRUPLE_DOT_RE.is_match(token) {
        Some(ConsonantDecoration::QuadrupleDot)
    } else if SINGLE_LINE_RE.is_match(token) {
        Some(ConsonantDecoration::SingleLine)
    } else if DOUBLE_LINE_RE.is_match(token) {
        Some(ConsonantDecoration::DoubleLine)
    } else if TRIPLE_LINE_RE.is_match(token) {
        Some(ConsonantDecoration::TripleLine)
    } else {
        None
    }
}

/// The placement band of a vocal token, or `None` for non-vowels.
pub fn vocal_placement(token: &str) -> Option<VocalPlacement> {
    if VOCAL_ON_LINE_RE.is_match(token) {
        Some(VocalPlacement::OnLine)
    } else if VOCAL_OUTSIDE_RE.is_match(token) {
        Some(VocalPlacement::Outside)
    } else if VOCAL_INSIDE_RE.is_match(token) {
        Some(VocalPlacement::Inside)
    } else {
        None
    }
}

/// The decoration of a vocal token, or `None` for non-vowels.
pub fn vocal_decoration(token: &str) -> Option<VocalDecoration> {
    if VOCAL_NO_DECORATION_RE.is_match(token) {
        Some(VocalDecoration::None)
    } else if VOCAL_LINE_INSIDE_RE.is_match(token) {
        Some(VocalDecoration::LineInside)
    } else if VOCAL_LINE_OUTSIDE_RE.is_match(token) {
        Some(VocalDecoration::LineOutside)
    } else {
        None
    }
}

/// Whether the token is a valid letter: any consonant placement group, the
/// vowel set, or the double-letter set.
pub fn is_valid_letter(token: &str) -> bool {
    consonant_placement(token).is_some() || is_vocal(token) || is_double_letter(token)
}

/// Classifies a 1-2 character token, or returns `None` for text outside the
/// alphabet.
pub fn classify(token: &str) -> Option<Classification> {
    if is_vocal(token) {
        return Some(Classification::Vocal {
            placement: vocal_placement(token)?,
            decoration: vocal_decoration(token)?,
        });
    }
    Some(Classification::Consonant {
        placement: consonant_placement(token)?,
        decoration: consonant_decoration(token)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocal_set() {
        for token in ["a", "e", "i", "o", "u", "A", "E", "I", "O", "U"] {
            assert!(is_vocal(token), "{token} should be a vocal");
        }
        assert!(!is_vocal("b"));
        assert!(!is_vocal("ae"));
    }

    #[test]
    fn test_consonant_placement_groups() {
        for token in ["b", "ch", "d", "g", "h", "f"] {
            assert_eq!(consonant_placement(token), Some(ConsonantPlacement::DeepCut));
        }
        for token in ["j", "ph", "k", "l", "c", "n", "p", "m"] {
            assert_eq!(consonant_placement(token), Some(ConsonantPlacement::Inside));
        }
        for token in ["t", "wh", "sh", "r", "v", "w", "s"] {
            assert_eq!(
                consonant_placement(token),
                Some(ConsonantPlacement::ShallowCut)
            );
        }
        for token in ["th", "gh", "y", "z", "q", "qu", "x", "ng"] {
            assert_eq!(consonant_placement(token), Some(ConsonantPlacement::OnLine));
        }
        assert_eq!(consonant_placement("a"), None);
        assert_eq!(consonant_placement("1"), None);
    }

    #[test]
    fn test_consonant_decoration_groups() {
        for token in ["b", "j", "t", "th"] {
            assert_eq!(consonant_decoration(token), Some(ConsonantDecoration::None));
        }
        for token in ["ph", "wh", "gh"] {
            assert_eq!(
                consonant_decoration(token),
                Some(ConsonantDecoration::SingleDot)
            );
        }
        for token in ["ch", "k", "sh", "y"] {
            assert_eq!(
                consonant_decoration(token),
                Some(ConsonantDecoration::DoubleDot)
            );
        }
        for token in ["d", "l", "r", "z"] {
            assert_eq!(
                consonant_decoration(token),
                Some(ConsonantDecoration::TripleDot)
            );
        }
        for token in ["c", "q"] {
            assert_eq!(
                consonant_decoration(token),
                Some(ConsonantDecoration::QuadrupleDot)
            );
        }
        for token in ["g", "n", "v", "qu"] {
            assert_eq!(
                consonant_decoration(token),
                Some(ConsonantDecoration::SingleLine)
            );
        }
        for token in ["h", "p", "w", "x"] {
            assert_eq!(
                consonant_decoration(token),
                Some(ConsonantDecoration::DoubleLine)
            );
        }
        for token in ["f", "m", "s", "ng"] {
            assert_eq!(
                consonant_decoration(token),
                Some(ConsonantDecoration::TripleLine)
            );
        }
    }

    #[test]
    fn test_vocal_placement_and_decoration() {
        for token in ["e", "i", "u"] {
            assert_eq!(vocal_placement(token), Some(VocalPlacement::OnLine));
        }
        assert_eq!(vocal_placement("a"), Some(VocalPlacement::Outside));
        assert_eq!(vocal_placement("o"), Some(VocalPlacement::Inside));

        for token in ["a", "e", "o"] {
            assert_eq!(vocal_decoration(token), Some(VocalDecoration::None));
        }
        assert_eq!(vocal_decoration("i"), Some(VocalDecoration::LineInside));
        assert_eq!(vocal_decoration("u"), Some(VocalDecoration::LineOutside));
        assert_eq!(vocal_decoration("b"), None);
    }

    #[test]
    fn test_double_letters() {
        for token in ["th", "ph", "wh", "gh", "ch", "sh", "qu", "ng"] {
            assert!(is_double_letter(token), "{token} should be a double letter");
        }
        assert!(is_double_letter("TH"));
        assert!(!is_double_letter("t"));
        assert!(!is_double_letter("tha"));
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(classify("B"), classify("b"));
        assert_eq!(classify("Qu"), classify("qu"));
        assert_eq!(classify("A"), classify("a"));
    }

    #[test]
    fn test_classify_returns_combined_category() {
        assert_eq!(
            classify("ch"),
            Some(Classification::Consonant {
                placement: ConsonantPlacement::DeepCut,
                decoration: ConsonantDecoration::DoubleDot,
            })
        );
        assert_eq!(
            classify("u"),
            Some(Classification::Vocal {
                placement: VocalPlacement::OnLine,
                decoration: VocalDecoration::LineOutside,
            })
        );
        assert_eq!(classify("!"), None);
        assert_eq!(classify("1"), None);
    }

    #[test]
    fn test_validity_predicate() {
        for token in ["a", "b", "th", "qu", "z", "X"] {
            assert!(is_valid_letter(token), "{token} should be valid");
        }
        for token in ["!", "1", " ", "é", "aa"] {
            assert!(!is_valid_letter(token), "{token} should be invalid");
        }
    }
}
