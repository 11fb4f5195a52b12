//! NYSIIS phonetic encoding
//!
//! The New York State Identification and Intelligence System code. More
//! discriminating than Soundex for surnames: it keeps vowel positions
//! (collapsed to `A`) and rewrites common letter clusters before coding.

use super::levenshtein::EditNormalization;
use super::phonetic::{encodable_letters, phonetic_similarity_with};
use super::PhoneticEncoder;
use crate::error::{Result, SimilarityError};

/// Conventional truncation length of a NYSIIS key
pub const NYSIIS_STANDARD_LENGTH: usize = 6;

/// NYSIIS phonetic encoder
///
/// # Parameters
/// - `max_length`: truncate codes to this many characters (`None` keeps the full code)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nysiis {
    pub max_length: Option<usize>,
}

impl Nysiis {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
        }
    }
}

impl PhoneticEncoder for Nysiis {
    fn encode(&self, word: &str) -> Result<String> {
        let mut code = nysiis(word)?;
        match self.max_length {
            Some(0) => return Err(SimilarityError::invalid("nysiis max_length must be at least 1")),
            Some(max) => code.truncate(max),
            None => {}
        }
        Ok(code)
    }

    fn name(&self) -> &'static str {
        "nysiis"
    }
}

#[inline]
fn is_vowel(c: char) -> bool {
    matches!(c, 'A' | 'E' | 'I' | 'O' | 'U')
}

/// Rewrite the leading cluster of the name
fn rewrite_prefix(name: &mut Vec<char>) {
    let starts = |prefix: &str, name: &[char]| {
        prefix.len() <= name.len() && prefix.chars().zip(name.iter()).all(|(p, &c)| p == c)
    };

    if starts("MAC", name) {
        name[..3].copy_from_slice(&['M', 'C', 'C']);
    } else if starts("KN", name) {
        name.remove(0);
    } else if starts("K", name) {
        name[0] = 'C';
    } else if starts("PH", name) || starts("PF", name) {
        name[..2].copy_from_slice(&['F', 'F']);
    } else if starts("SCH", name) {
        name[..3].copy_from_slice(&['S', 'S', 'S']);
    }
}

/// Rewrite the trailing cluster of the name
fn rewrite_suffix(name: &mut Vec<char>) {
    let n = name.len();
    if n < 2 {
        return;
    }
    match (name[n - 2], name[n - 1]) {
        ('E', 'E') | ('I', 'E') => {
            name.truncate(n - 2);
            name.push('Y');
        }
        ('D', 'T') | ('R', 'T') | ('R', 'D') | ('N', 'T') | ('N', 'D') => {
            name.truncate(n - 2);
            name.push('D');
        }
        _ => {}
    }
}

/// Encode a word with NYSIIS.
///
/// Accented letters are folded to their ASCII base and other characters are
/// ignored. Fails with [`SimilarityError::InvalidArgument`] when no letter
/// remains or the first letter has no ASCII base.
///
/// # Examples
/// ```
/// use simblend::algorithms::nysiis::nysiis;
///
/// assert_eq!(nysiis("Knight").unwrap(), "NAGT");
/// assert_eq!(nysiis("Macintosh").unwrap(), "MCANT");
/// ```
pub fn nysiis(word: &str) -> Result<String> {
    let mut name = encodable_letters(word, "nysiis")?;

    rewrite_prefix(&mut name);
    rewrite_suffix(&mut name);

    let len = name.len();
    let mut key = String::with_capacity(len);
    key.push(name[0]);

    let mut i = 1;
    while i < len {
        let c = name[i];
        let prev = name[i - 1];
        let next = name.get(i + 1).copied();

        let chunk: String = match c {
            'E' if next == Some('V') => {
                i += 1;
                "AF".into()
            }
            'A' | 'E' | 'I' | 'O' | 'U' => "A".into(),
            'Q' => "G".into(),
            'Z' => "S".into(),
            'M' => "N".into(),
            'K' if next == Some('N') => "N".into(),
            'K' => "C".into(),
            'S' if next == Some('C') && name.get(i + 2) == Some(&'H') => {
                i += 2;
                "SS".into()
            }
            'P' if next == Some('H') => {
                i += 1;
                "F".into()
            }
            'H' if !is_vowel(prev) || next.map_or(true, |n| !is_vowel(n)) => {
                if is_vowel(prev) {
                    "A".into()
                } else {
                    prev.to_string()
                }
            }
            'W' if is_vowel(prev) => prev.to_string(),
            other => other.to_string(),
        };

        if chunk.chars().last() != key.chars().last() {
            key.push_str(&chunk);
        }
        i += 1;
    }

    if key.len() > 1 && key.ends_with('S') {
        key.pop();
    }
    if key.ends_with("AY") {
        key.truncate(key.len() - 2);
        key.push('Y');
    }
    if key.len() > 1 && key.ends_with('A') {
        key.pop();
    }

    Ok(key)
}

/// NYSIIS similarity: edit-distance ratio between the two codes.
pub fn nysiis_similarity(a: &str, b: &str) -> Result<f64> {
    phonetic_similarity_with(&Nysiis::new(), a, b, EditNormalization::RatioShortest)
}
