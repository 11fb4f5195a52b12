//! Optional backends available to the aggregator
//!
//! Which backends exist is decided at compile time by cargo features. The
//! struct is built once, never mutated, and handed to each
//! [`Aggregator`](crate::Aggregator). Constructing it by hand lets a caller
//! withhold a backend that is compiled in.

use serde::{Deserialize, Serialize};

/// Optional metric backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// SIMD edit distance for ASCII input (`fast-levenshtein` feature)
    pub fast_edit_distance: bool,
    /// Soundex phonetic codes
    pub soundex: bool,
    /// NYSIIS phonetic codes (`nysiis` feature)
    pub nysiis: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}

impl Capabilities {
    /// Backends compiled into this build
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            fast_edit_distance: cfg!(feature = "fast-levenshtein"),
            soundex: true,
            nysiis: cfg!(feature = "nysiis"),
        }
    }

    /// No optional backend: graphemic metrics with the plain DP only
    #[must_use]
    pub const fn graphemic_only() -> Self {
        Self {
            fast_edit_distance: false,
            soundex: false,
            nysiis: false,
        }
    }

    /// Whether any phonetic backend is available
    #[must_use]
    pub fn has_phonetic(&self) -> bool {
        self.soundex || self.nysiis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_matches_features() {
        let caps = Capabilities::detect();
        assert!(caps.soundex);
        assert_eq!(caps.nysiis, cfg!(feature = "nysiis"));
        assert_eq!(caps.fast_edit_distance, cfg!(feature = "fast-levenshtein"));
    }

    #[test]
    fn test_graphemic_only() {
        assert!(!Capabilities::graphemic_only().has_phonetic());
    }
}
