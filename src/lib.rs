//! simblend - blended string similarity
//!
//! Scores how alike two strings are by averaging several metrics:
//!
//! - graphemic: sequence-matcher ratio, Levenshtein ratio, Sørensen-Dice and
//!   Jaccard over n-gram sets
//! - phonetic: Soundex and NYSIIS codes compared by Levenshtein ratio
//!
//! The blend is a weighted mean over the metrics that could actually be
//! computed. A phonetic backend that is not compiled in (or withheld via
//! [`Capabilities`]) is left out of the mean rather than scored as zero.
//!
//! # Example
//! ```
//! use simblend::{similarity, SimilarityConfig};
//!
//! let score = similarity("Robert", "Rupert", &SimilarityConfig::default()).unwrap();
//! assert!(score > 0.5 && score < 1.0);
//! ```
//!
//! # Features
//! - `nysiis` (default): NYSIIS phonetic metric
//! - `fast-levenshtein`: SIMD edit distance for ASCII input via `triple_accel`

pub mod aggregate;
pub mod algorithms;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod logging;

pub use aggregate::{
    graphemic_similarity, phonetic_similarity, similarity, weighted_mean, Aggregator,
    MetricScore, SimilarityReport, SkipReason,
};
pub use algorithms::levenshtein::{
    edit_distance, levenshtein, levenshtein_matrix, DistanceMatrix, EditNormalization,
};
pub use algorithms::ngram::NgramConfig;
pub use algorithms::normalize::NormalizationMode;
pub use algorithms::phonetic::{phonetic_code, soundex, SoundexVariant};
pub use algorithms::{EditDistance, PhoneticEncoder, Similarity};
pub use capabilities::Capabilities;
pub use config::{Metric, MetricToggles, MetricWeights, SimilarityConfig};
pub use error::{Result, SimilarityError};
