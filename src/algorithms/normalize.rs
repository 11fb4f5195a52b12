//! Optional input normalization
//!
//! Metrics compare the literal strings they are given. These modes are only
//! applied when a configuration asks for them.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Normalization mode for string preprocessing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationMode {
    /// Convert to lowercase only
    Lowercase,
    /// Trim leading and trailing whitespace
    Trim,
    /// Apply Unicode NFKD normalization
    UnicodeNfkd,
    /// Remove punctuation characters
    RemovePunctuation,
    /// Collapse runs of whitespace to a single space and trim
    CollapseWhitespace,
    /// NFKD, lowercase, drop punctuation, collapse whitespace
    Strict,
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a string according to the specified mode.
///
/// Borrows the input when the mode leaves it unchanged.
#[must_use]
pub fn normalize_string(s: &str, mode: NormalizationMode) -> Cow<'_, str> {
    match mode {
        NormalizationMode::Lowercase => {
            if s.chars().any(char::is_uppercase) {
                Cow::Owned(s.to_lowercase())
            } else {
                Cow::Borrowed(s)
            }
        }
        NormalizationMode::Trim => Cow::Borrowed(s.trim()),
        NormalizationMode::UnicodeNfkd => Cow::Owned(s.nfkd().collect()),
        NormalizationMode::RemovePunctuation => {
            if s.chars().any(|c| c.is_ascii_punctuation()) {
                Cow::Owned(s.chars().filter(|c| !c.is_ascii_punctuation()).collect())
            } else {
                Cow::Borrowed(s)
            }
        }
        NormalizationMode::CollapseWhitespace => Cow::Owned(collapse_whitespace(s)),
        NormalizationMode::Strict => {
            let folded: String = s
                .nfkd()
                .flat_map(char::to_lowercase)
                .filter(|c| !c.is_ascii_punctuation())
                .collect();
            Cow::Owned(collapse_whitespace(&folded))
        }
    }
}

/// Normalize both strings, or borrow them unchanged when `mode` is `None`.
#[must_use]
pub fn normalize_pair<'a>(
    a: &'a str,
    b: &'a str,
    mode: Option<NormalizationMode>,
) -> (Cow<'a, str>, Cow<'a, str>) {
    match mode {
        Some(mode) => (normalize_string(a, mode), normalize_string(b, mode)),
        None => (Cow::Borrowed(a), Cow::Borrowed(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase() {
        assert_eq!(
            normalize_string("Hello World", NormalizationMode::Lowercase),
            "hello world"
        );
        assert!(matches!(
            normalize_string("already", NormalizationMode::Lowercase),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_trim_and_collapse() {
        assert_eq!(normalize_string("  a b  ", NormalizationMode::Trim), "a b");
        assert_eq!(
            normalize_string(" a \t  b\n", NormalizationMode::CollapseWhitespace),
            "a b"
        );
    }

    #[test]
    fn test_remove_punctuation() {
        assert_eq!(
            normalize_string("O'Brien, Jr.", NormalizationMode::RemovePunctuation),
            "OBrien Jr"
        );
    }

    #[test]
    fn test_nfkd_decomposes() {
        let decomposed = normalize_string("é", NormalizationMode::UnicodeNfkd);
        assert_eq!(decomposed.chars().count(), 2);
    }

    #[test]
    fn test_strict() {
        assert_eq!(
            normalize_string("  Hello,   World!  ", NormalizationMode::Strict),
            "hello world"
        );
    }

    #[test]
    fn test_normalize_pair_none_borrows() {
        let (a, b) = normalize_pair("Hello", "WORLD", None);
        assert!(matches!(a, Cow::Borrowed("Hello")));
        assert!(matches!(b, Cow::Borrowed("WORLD")));

        let (a, b) = normalize_pair("Hello", "WORLD", Some(NormalizationMode::Lowercase));
        assert_eq!(a, "hello");
        assert_eq!(b, "world");
    }
}
