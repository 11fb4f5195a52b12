//! Weighted blending of similarity metrics
//!
//! The [`Aggregator`] resolves a [`SimilarityConfig`] against the available
//! [`Capabilities`], computes every requested metric it can, and combines
//! them as a weighted mean:
//!
//! ```text
//! score = Σ(weight_i × value_i) / Σ(weight_i)
//! ```
//!
//! A metric that cannot be computed leaves both sums. It never counts as a
//! zero.

use serde::Serialize;
use tracing::debug;

use crate::algorithms::levenshtein::Levenshtein;
use crate::algorithms::ngram::{Jaccard, Sorensen};
#[cfg(feature = "nysiis")]
use crate::algorithms::nysiis::Nysiis;
use crate::algorithms::normalize::normalize_pair;
use crate::algorithms::phonetic::{phonetic_similarity_with, Soundex};
use crate::algorithms::sequence::SequenceRatio;
use crate::algorithms::{PhoneticEncoder, Similarity};
use crate::capabilities::Capabilities;
use crate::config::{Metric, SimilarityConfig};
use crate::error::{Result, SimilarityError};

/// Value of one metric and its weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricScore {
    pub metric: Metric,
    /// Similarity in [0, 1]
    pub value: f64,
    pub weight: f64,
}

impl MetricScore {
    /// Get the weighted score (value × weight)
    #[must_use]
    pub fn weighted_score(&self) -> f64 {
        self.value * self.weight
    }
}

/// Why a requested metric did not contribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The metric's backend is not available
    BackendUnavailable,
    /// An input has no letters to encode phonetically
    NotEncodable,
}

/// Per-metric breakdown of a similarity computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityReport {
    /// Weighted mean of `components`
    pub score: f64,
    pub components: Vec<MetricScore>,
    pub skipped: Vec<(Metric, SkipReason)>,
}

impl SimilarityReport {
    /// Value of a metric that contributed, if any
    #[must_use]
    pub fn component(&self, metric: Metric) -> Option<f64> {
        self.components
            .iter()
            .find(|c| c.metric == metric)
            .map(|c| c.value)
    }
}

/// Weighted average of metric scores.
///
/// Fails with `NoMetricAvailable` when `scores` is empty and with
/// `InvalidArgument` when their weights sum to zero or overflow.
pub fn weighted_mean(scores: &[MetricScore]) -> Result<f64> {
    if scores.is_empty() {
        return Err(SimilarityError::NoMetricAvailable);
    }

    let mut total_weighted_score = 0.0;
    let mut total_weight = 0.0;
    for score in scores {
        total_weighted_score += score.weighted_score();
        total_weight += score.weight;
    }

    if total_weight <= 0.0 {
        return Err(SimilarityError::invalid(
            "weights of the computed metrics sum to zero",
        ));
    }
    let mean = total_weighted_score / total_weight;
    if mean.is_finite() {
        Ok(mean.clamp(0.0, 1.0))
    } else {
        Err(SimilarityError::invalid(
            "weighted mean is not finite; reduce the metric weights",
        ))
    }
}

/// Blends configured metrics into one similarity score
#[derive(Debug, Clone)]
pub struct Aggregator {
    capabilities: Capabilities,
    config: SimilarityConfig,
}

impl Default for Aggregator {
    fn default() -> Self {
        let capabilities = Capabilities::detect();
        Self {
            capabilities,
            config: SimilarityConfig::for_capabilities(&capabilities),
        }
    }
}

impl Aggregator {
    /// Create an aggregator, validating the configuration.
    pub fn new(capabilities: Capabilities, config: SimilarityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            capabilities,
            config,
        })
    }

    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[must_use]
    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    fn levenshtein(&self) -> Levenshtein {
        Levenshtein::new()
            .with_normalization(self.config.edit_normalization)
            .accelerated(self.capabilities.fast_edit_distance)
    }

    fn phonetic(&self, encoder: &dyn PhoneticEncoder, a: &str, b: &str) -> Result<f64> {
        phonetic_similarity_with(encoder, a, b, self.config.edit_normalization)
    }

    #[cfg(feature = "nysiis")]
    fn nysiis(&self, a: &str, b: &str) -> Result<f64> {
        let encoder = Nysiis {
            max_length: self.config.nysiis_max_length,
        };
        self.phonetic(&encoder, a, b)
    }

    #[cfg(not(feature = "nysiis"))]
    fn nysiis(&self, _a: &str, _b: &str) -> Result<f64> {
        Err(SimilarityError::BackendUnavailable(Metric::Nysiis))
    }

    /// Compute a single metric on already-normalized input.
    ///
    /// Returns `BackendUnavailable` when the capabilities lack the metric's
    /// backend, and `InvalidArgument` when a phonetic code cannot be formed.
    pub fn metric(&self, metric: Metric, a: &str, b: &str) -> Result<f64> {
        match metric {
            Metric::SequenceRatio => Ok(SequenceRatio.similarity(a, b)),
            Metric::LevenshteinRatio => Ok(Similarity::similarity(&self.levenshtein(), a, b)),
            Metric::Sorensen => Ok(Sorensen::new(self.config.ngram).similarity(a, b)),
            Metric::Jaccard => Ok(Jaccard::new(self.config.ngram).similarity(a, b)),
            Metric::Soundex => {
                if !self.capabilities.soundex {
                    return Err(SimilarityError::BackendUnavailable(metric));
                }
                self.phonetic(&Soundex::with_variant(self.config.soundex_variant), a, b)
            }
            Metric::Nysiis => {
                if !self.capabilities.nysiis {
                    return Err(SimilarityError::BackendUnavailable(metric));
                }
                self.nysiis(a, b)
            }
        }
    }

    /// Compute every requested metric and their weighted mean.
    ///
    /// # Errors
    /// - `InvalidArgument` if either input is empty (after normalization)
    /// - `NoMetricAvailable` if no requested metric could be computed
    pub fn report(&self, str1: &str, str2: &str) -> Result<SimilarityReport> {
        let (a, b) = normalize_pair(str1, str2, self.config.normalization);
        if a.is_empty() || b.is_empty() {
            return Err(SimilarityError::invalid(
                "similarity requires two non-empty strings",
            ));
        }

        let mut components = Vec::new();
        let mut skipped = Vec::new();

        for metric in self.config.metrics.enabled() {
            match self.metric(metric, &a, &b) {
                Ok(value) => {
                    let weight = self.config.weights.get(metric);
                    debug!(%metric, value, weight, "metric computed");
                    components.push(MetricScore {
                        metric,
                        value,
                        weight,
                    });
                }
                Err(SimilarityError::BackendUnavailable(_)) => {
                    debug!(%metric, "backend unavailable, metric excluded");
                    skipped.push((metric, SkipReason::BackendUnavailable));
                }
                Err(SimilarityError::InvalidArgument(reason)) if metric.is_phonetic() => {
                    debug!(%metric, %reason, "input not encodable, metric excluded");
                    skipped.push((metric, SkipReason::NotEncodable));
                }
                Err(e) => return Err(e),
            }
        }

        let score = weighted_mean(&components)?;
        debug!(score, computed = components.len(), skipped = skipped.len(), "similarity");

        Ok(SimilarityReport {
            score,
            components,
            skipped,
        })
    }

    /// Weighted mean of every requested metric that could be computed.
    ///
    /// # Example
    /// ```
    /// use simblend::{Aggregator, Capabilities, SimilarityConfig};
    ///
    /// let aggregator = Aggregator::new(Capabilities::detect(), SimilarityConfig::graphemic()).unwrap();
    /// assert_eq!(aggregator.similarity("fuzzy", "fuzzy").unwrap(), 1.0);
    /// ```
    pub fn similarity(&self, str1: &str, str2: &str) -> Result<f64> {
        self.report(str1, str2).map(|report| report.score)
    }
}

/// Similarity with the given configuration and the compiled-in backends.
pub fn similarity(str1: &str, str2: &str, config: &SimilarityConfig) -> Result<f64> {
    Aggregator::new(Capabilities::detect(), config.clone())?.similarity(str1, str2)
}

/// Unweighted mean of the four graphemic metrics.
pub fn graphemic_similarity(str1: &str, str2: &str) -> Result<f64> {
    similarity(str1, str2, &SimilarityConfig::graphemic())
}

/// Unweighted mean of the available phonetic metrics.
///
/// Fails with `NoMetricAvailable` when no phonetic backend can encode the
/// inputs.
pub fn phonetic_similarity(str1: &str, str2: &str) -> Result<f64> {
    similarity(str1, str2, &SimilarityConfig::phonetic())
}
