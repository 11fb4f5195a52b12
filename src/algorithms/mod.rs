//! Core string similarity algorithms
//!
//! Each algorithm is implemented as a standalone function for composability,
//! plus a trait-based interface so the aggregator can treat them uniformly.

pub mod levenshtein;
pub mod ngram;
pub mod normalize;
#[cfg(feature = "nysiis")]
pub mod nysiis;
pub mod phonetic;
pub mod sequence;

pub use levenshtein::*;
pub use ngram::*;
#[cfg(feature = "nysiis")]
pub use nysiis::*;
pub use phonetic::*;
pub use sequence::*;

use crate::error::Result;

/// Trait for all graphemic similarity metrics.
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Convenience method for distance (1.0 - similarity)
    fn distance(&self, a: &str, b: &str) -> f64 {
        1.0 - self.similarity(a, b)
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Trait for edit distance algorithms that return integer distances
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> usize;

    /// Convert to normalized similarity score (0.0 to 1.0)
    fn similarity(&self, a: &str, b: &str) -> f64 {
        ratio_from_distance(self.distance(a, b), a.chars().count(), b.chars().count())
    }

    fn name(&self) -> &'static str;
}

/// Blanket implementation: any EditDistance is also a Similarity
impl<T: EditDistance> Similarity for T {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        EditDistance::similarity(self, a, b)
    }

    fn name(&self) -> &'static str {
        EditDistance::name(self)
    }
}

/// Trait for phonetic encoders.
///
/// Encoding can fail: a word with no letters has no code.
pub trait PhoneticEncoder: Send + Sync {
    fn encode(&self, word: &str) -> Result<String>;

    fn name(&self) -> &'static str;
}

/// `1 - distance / max(len_a, len_b)`, with two empty strings scoring 1.0
#[inline]
pub(crate) fn ratio_from_distance(dist: usize, len_a: usize, len_b: usize) -> f64 {
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        1.0
    } else {
        1.0 - (dist as f64 / max_len as f64)
    }
}
