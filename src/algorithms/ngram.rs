//! Set-overlap similarity over character n-grams
//!
//! Sørensen-Dice and Jaccard coefficients computed on the *sets* of n-grams
//! of the two strings. With `n = 1` and no padding this is the classic
//! character-set comparison: `"kitten"` is `{k, i, t, e, n}`.
//!
//! # N-gram Size Limits
//!
//! Valid n-gram sizes are in the range 1-32 (inclusive).
//! - `n = 0` returns empty results / 0.0 similarity (invalid)
//! - `n > 32` is clamped to 32 to prevent excessive memory usage

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use super::Similarity;

/// Maximum valid n-gram size. Values above this are clamped.
pub const MAX_NGRAM_SIZE: usize = 32;

/// Returns 0 for n=0 (callers treat as invalid), otherwise clamps to 1-32.
#[inline]
fn validate_ngram_size(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        n.min(MAX_NGRAM_SIZE)
    }
}

/// Configuration for n-gram extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NgramConfig {
    /// Size of each n-gram
    pub n: usize,
    /// Whether to pad strings for edge matching
    pub pad: bool,
    /// Padding character
    pub pad_char: char,
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self {
            n: 1,
            pad: false,
            pad_char: ' ',
        }
    }
}

impl NgramConfig {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self { n, ..Default::default() }
    }

    #[must_use]
    pub fn with_padding(mut self, pad: bool) -> Self {
        self.pad = pad;
        self
    }

    /// Extract n-grams from a string
    #[must_use]
    pub fn extract(&self, s: &str) -> Vec<String> {
        extract_ngrams(s, self.n, self.pad, self.pad_char)
    }
}

/// Sørensen-Dice coefficient calculator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sorensen {
    pub config: NgramConfig,
}

impl Sorensen {
    #[must_use]
    pub fn new(config: NgramConfig) -> Self {
        Self { config }
    }
}

impl Similarity for Sorensen {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        sorensen_similarity(a, b, &self.config)
    }

    fn name(&self) -> &'static str {
        "sorensen"
    }
}

/// Jaccard coefficient calculator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jaccard {
    pub config: NgramConfig,
}

impl Jaccard {
    #[must_use]
    pub fn new(config: NgramConfig) -> Self {
        Self { config }
    }
}

impl Similarity for Jaccard {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        jaccard_similarity(a, b, &self.config)
    }

    fn name(&self) -> &'static str {
        "jaccard"
    }
}

/// Extract n-grams from a string.
///
/// # Arguments
/// * `n` - N-gram size (1-32). Values of 0 return empty vec, values >32 are clamped.
#[must_use]
pub fn extract_ngrams(s: &str, n: usize, pad: bool, pad_char: char) -> Vec<String> {
    let n = validate_ngram_size(n);
    if n == 0 {
        return vec![];
    }

    let chars: Vec<char> = if pad {
        let char_count = s.chars().count();
        let mut result = Vec::with_capacity(char_count + 2 * (n - 1));
        result.extend(std::iter::repeat(pad_char).take(n - 1));
        result.extend(s.chars());
        result.extend(std::iter::repeat(pad_char).take(n - 1));
        result
    } else {
        s.chars().collect()
    };

    if chars.len() < n {
        return vec![];
    }

    chars.windows(n).map(|w| w.iter().collect()).collect()
}

/// Extract n-grams as a set for fast comparison
#[must_use]
pub fn extract_ngram_set(s: &str, config: &NgramConfig) -> AHashSet<String> {
    extract_ngrams(s, config.n, config.pad, config.pad_char)
        .into_iter()
        .collect()
}

/// Sørensen-Dice coefficient: `2|A ∩ B| / (|A| + |B|)`.
///
/// Two strings with no n-grams at all are identical (1.0); if only one side
/// has n-grams the score is 0.0. Returns 0.0 if `n` is 0.
///
/// # Example
/// ```
/// use simblend::algorithms::ngram::{sorensen_similarity, NgramConfig};
///
/// // {k,i,t,e,n} vs {s,i,t,n,g}: 3 shared
/// let sim = sorensen_similarity("kitten", "sitting", &NgramConfig::default());
/// assert!((sim - 0.6).abs() < 1e-12);
/// ```
#[must_use]
pub fn sorensen_similarity(a: &str, b: &str, config: &NgramConfig) -> f64 {
    if config.n == 0 {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let a_ngrams = extract_ngram_set(a, config);
    let b_ngrams = extract_ngram_set(b, config);

    if a_ngrams.is_empty() && b_ngrams.is_empty() {
        return 1.0;
    }
    if a_ngrams.is_empty() || b_ngrams.is_empty() {
        return 0.0;
    }

    let intersection = a_ngrams.intersection(&b_ngrams).count();
    (2.0 * intersection as f64) / (a_ngrams.len() + b_ngrams.len()) as f64
}

/// Jaccard coefficient: `|A ∩ B| / |A ∪ B|`. Returns 0.0 if `n` is 0.
#[must_use]
pub fn jaccard_similarity(a: &str, b: &str, config: &NgramConfig) -> f64 {
    if config.n == 0 {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let a_ngrams = extract_ngram_set(a, config);
    let b_ngrams = extract_ngram_set(b, config);

    if a_ngrams.is_empty() && b_ngrams.is_empty() {
        return 1.0;
    }

    let intersection = a_ngrams.intersection(&b_ngrams).count();
    let union = a_ngrams.union(&b_ngrams).count();

    if union == 0 {
        1.0
    } else {
        intersection as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ngrams() {
        let ngrams = extract_ngrams("abc", 2, false, ' ');
        assert_eq!(ngrams, vec!["ab", "bc"]);

        let ngrams_padded = extract_ngrams("abc", 2, true, ' ');
        assert_eq!(ngrams_padded, vec![" a", "ab", "bc", "c "]);

        assert!(extract_ngrams("abc", 0, false, ' ').is_empty());
        assert!(extract_ngrams("a", 2, false, ' ').is_empty());
    }

    #[test]
    fn test_character_sets() {
        let cfg = NgramConfig::default();
        let sor = sorensen_similarity("kitten", "sitting", &cfg);
        let jac = jaccard_similarity("kitten", "sitting", &cfg);
        assert!((sor - 0.6).abs() < 1e-12);
        assert!((jac - 3.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_bigram_sorensen() {
        // " n", "ni", "ig", "gh", "ht", "t " vs " n", "na", "ac", "ch", "ht", "t "
        let cfg = NgramConfig::new(2).with_padding(true);
        assert!((sorensen_similarity("night", "nacht", &cfg) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_case_sensitive() {
        let cfg = NgramConfig::default();
        assert_eq!(jaccard_similarity("A", "a", &cfg), 0.0);
    }

    #[test]
    fn test_empty_inputs() {
        let cfg = NgramConfig::default();
        assert_eq!(sorensen_similarity("", "", &cfg), 1.0);
        assert_eq!(sorensen_similarity("abc", "", &cfg), 0.0);
        assert_eq!(jaccard_similarity("", "abc", &cfg), 0.0);
    }

    #[test]
    fn test_zero_n() {
        let cfg = NgramConfig::new(0);
        assert_eq!(sorensen_similarity("abc", "abc", &cfg), 0.0);
        assert_eq!(jaccard_similarity("abc", "abd", &cfg), 0.0);
    }

    #[test]
    fn test_trait_names() {
        assert_eq!(Sorensen::default().name(), "sorensen");
        assert_eq!(Jaccard::default().name(), "jaccard");
    }
}
