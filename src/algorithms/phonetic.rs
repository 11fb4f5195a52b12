//! Soundex phonetic encoding
//!
//! Encodes a word as its first letter followed by three digits summarizing
//! the consonant skeleton, so that differently spelled but similarly
//! pronounced names compare equal.
//!
//! | Digit | Letters                  |
//! |-------|--------------------------|
//! | 1     | b f p v                  |
//! | 2     | c g j k q s x z          |
//! | 3     | d t                      |
//! | 4     | l                        |
//! | 5     | m n                      |
//! | 6     | r                        |
//!
//! Vowels (`a e i o u y`) are dropped but separate same-digit consonants, so
//! both are coded. `h` and `w` are dropped without separating: same-digit
//! consonants on either side of them collapse to one digit. The first letter
//! takes part in that collapsing even though it is never written as a digit.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::levenshtein::{edit_distance, EditNormalization};
use super::PhoneticEncoder;
use crate::error::{Result, SimilarityError};

/// Length of a Soundex code: one letter plus three digits
pub const SOUNDEX_LENGTH: usize = 4;

/// Rule set for the `h`/`w` separators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundexVariant {
    /// American Soundex: `h`/`w` do not separate same-digit consonants
    #[default]
    American,
    /// Simplified Soundex, as several SQL engines implement it: `h`/`w`
    /// separate like vowels
    Simplified,
}

/// How a letter takes part in Soundex coding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LetterClass {
    /// Consonant written as the given digit
    Coded(u8),
    /// a, e, i, o, u, y: dropped, resets adjacency
    Vowel,
    /// h, w: dropped, keeps adjacency (American rules)
    Weak,
}

#[inline]
fn classify(c: char) -> LetterClass {
    match c.to_ascii_lowercase() {
        'b' | 'f' | 'p' | 'v' => LetterClass::Coded(1),
        'c' | 'g' | 'j' | 'k' | 'q' | 's' | 'x' | 'z' => LetterClass::Coded(2),
        'd' | 't' => LetterClass::Coded(3),
        'l' => LetterClass::Coded(4),
        'm' | 'n' => LetterClass::Coded(5),
        'r' => LetterClass::Coded(6),
        'h' | 'w' => LetterClass::Weak,
        _ => LetterClass::Vowel,
    }
}

/// Soundex phonetic encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Soundex {
    pub variant: SoundexVariant,
}

impl Soundex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_variant(variant: SoundexVariant) -> Self {
        Self { variant }
    }
}

impl PhoneticEncoder for Soundex {
    fn encode(&self, word: &str) -> Result<String> {
        soundex_with_variant(word, self.variant)
    }

    fn name(&self) -> &'static str {
        "soundex"
    }
}

/// Encode a word using American Soundex.
///
/// Accented letters are folded to their ASCII base (`Ö` codes as `O`) and
/// other characters are ignored. Fails with
/// [`SimilarityError::InvalidArgument`] when no letter remains or the first
/// letter has no ASCII base.
///
/// # Examples
/// ```
/// use simblend::algorithms::phonetic::soundex;
///
/// assert_eq!(soundex("Robert").unwrap(), "R163");
/// assert_eq!(soundex("Tymczak").unwrap(), "T522");
/// assert!(soundex("").is_err());
/// ```
pub fn soundex(word: &str) -> Result<String> {
    soundex_with_variant(word, SoundexVariant::American)
}

/// Uppercase ASCII letters of `word`, with diacritics stripped first.
///
/// Fails when there is no letter, or when the first letter has no ASCII base
/// form: a phonetic code must start with the word's own first letter.
pub(crate) fn encodable_letters(word: &str, encoder: &str) -> Result<Vec<char>> {
    let folded: Vec<char> = word.nfkd().filter(|&c| !is_combining_mark(c)).collect();
    match folded.iter().find(|c| c.is_alphabetic()) {
        None => Err(SimilarityError::invalid(format!(
            "{encoder} requires a word with at least one letter"
        ))),
        Some(c) if !c.is_ascii() => Err(SimilarityError::invalid(format!(
            "{encoder} cannot encode the leading letter '{c}'"
        ))),
        Some(_) => Ok(folded
            .into_iter()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .collect()),
    }
}

/// Encode a word with the given Soundex rule set.
pub fn soundex_with_variant(word: &str, variant: SoundexVariant) -> Result<String> {
    let letters = encodable_letters(word, "soundex")?;
    let mut letters = letters.into_iter();

    let first = letters
        .next()
        .ok_or_else(|| SimilarityError::invalid("soundex requires a word with at least one letter"))?;

    let mut code = String::with_capacity(SOUNDEX_LENGTH);
    code.push(first.to_ascii_uppercase());

    // Digit class of the last coded letter still adjacent to the current one
    let mut last = match classify(first) {
        LetterClass::Coded(d) => Some(d),
        _ => None,
    };

    for c in letters {
        if code.len() == SOUNDEX_LENGTH {
            break;
        }
        match classify(c) {
            LetterClass::Coded(d) => {
                if last != Some(d) {
                    code.push(char::from(b'0' + d));
                }
                last = Some(d);
            }
            LetterClass::Vowel => last = None,
            LetterClass::Weak => {
                if variant == SoundexVariant::Simplified {
                    last = None;
                }
            }
        }
    }

    while code.len() < SOUNDEX_LENGTH {
        code.push('0');
    }

    Ok(code)
}

/// Soundex code of a single word (American rules).
///
/// The first letter is uppercased and kept; three digits follow.
pub fn phonetic_code(word: &str) -> Result<String> {
    soundex(word)
}

/// Check if two words have the same Soundex code.
pub fn soundex_match(a: &str, b: &str) -> Result<bool> {
    Ok(soundex(a)? == soundex(b)?)
}

/// Similarity of two words by the edit-distance ratio of their phonetic codes.
///
/// `normalization` must be a ratio mode; `Raw` is treated as `RatioShortest`.
pub fn phonetic_similarity_with<E: PhoneticEncoder + ?Sized>(
    encoder: &E,
    a: &str,
    b: &str,
    normalization: EditNormalization,
) -> Result<f64> {
    let code_a = encoder.encode(a)?;
    let code_b = encoder.encode(b)?;
    let normalization = if normalization.is_ratio() {
        normalization
    } else {
        EditNormalization::RatioShortest
    };
    tracing::trace!(
        encoder = encoder.name(),
        %code_a,
        %code_b,
        "phonetic codes"
    );
    Ok(edit_distance(&code_a, &code_b, normalization))
}

/// Soundex similarity: edit-distance ratio between the two codes.
pub fn soundex_similarity(a: &str, b: &str) -> Result<f64> {
    phonetic_similarity_with(&Soundex::new(), a, b, EditNormalization::RatioShortest)
}
