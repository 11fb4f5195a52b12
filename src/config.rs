//! Similarity configuration
//!
//! A [`SimilarityConfig`] says which metrics to blend, how much each one
//! weighs, and how the inputs and edit distances are normalized. It is plain
//! data: build it in code with the `with_*` methods or load it from JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithms::levenshtein::EditNormalization;
use crate::algorithms::ngram::NgramConfig;
use crate::algorithms::normalize::NormalizationMode;
use crate::algorithms::phonetic::SoundexVariant;
use crate::capabilities::Capabilities;
use crate::error::{Result, SimilarityError};

/// A single metric the aggregator can blend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Ratcliff/Obershelp matching-block ratio
    SequenceRatio,
    /// Normalized Levenshtein distance
    LevenshteinRatio,
    /// Sørensen-Dice coefficient over n-gram sets
    Sorensen,
    /// Jaccard coefficient over n-gram sets
    Jaccard,
    /// Edit-distance ratio between Soundex codes
    Soundex,
    /// Edit-distance ratio between NYSIIS codes
    Nysiis,
}

impl Metric {
    /// All metrics in evaluation order
    pub const ALL: [Metric; 6] = [
        Metric::SequenceRatio,
        Metric::LevenshteinRatio,
        Metric::Sorensen,
        Metric::Jaccard,
        Metric::Soundex,
        Metric::Nysiis,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Metric::SequenceRatio => "sequence_ratio",
            Metric::LevenshteinRatio => "levenshtein_ratio",
            Metric::Sorensen => "sorensen",
            Metric::Jaccard => "jaccard",
            Metric::Soundex => "soundex",
            Metric::Nysiis => "nysiis",
        }
    }

    /// Whether the metric compares spelled forms (as opposed to pronunciation)
    #[must_use]
    pub fn is_graphemic(self) -> bool {
        !self.is_phonetic()
    }

    #[must_use]
    pub fn is_phonetic(self) -> bool {
        matches!(self, Metric::Soundex | Metric::Nysiis)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which metrics are requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricToggles {
    pub sequence_ratio: bool,
    pub levenshtein_ratio: bool,
    pub sorensen: bool,
    pub jaccard: bool,
    pub phonetic_soundex: bool,
    pub phonetic_nysiis: bool,
}

impl Default for MetricToggles {
    fn default() -> Self {
        Self::for_capabilities(&Capabilities::detect())
    }
}

impl MetricToggles {
    /// Every metric whose backend is available
    #[must_use]
    pub fn for_capabilities(capabilities: &Capabilities) -> Self {
        Self {
            sequence_ratio: true,
            levenshtein_ratio: true,
            sorensen: true,
            jaccard: true,
            phonetic_soundex: capabilities.soundex,
            phonetic_nysiis: capabilities.nysiis,
        }
    }

    /// The four graphemic metrics, no phonetic ones
    #[must_use]
    pub fn graphemic() -> Self {
        Self {
            sequence_ratio: true,
            levenshtein_ratio: true,
            sorensen: true,
            jaccard: true,
            phonetic_soundex: false,
            phonetic_nysiis: false,
        }
    }

    /// Soundex and NYSIIS only
    #[must_use]
    pub fn phonetic() -> Self {
        Self {
            sequence_ratio: false,
            levenshtein_ratio: false,
            sorensen: false,
            jaccard: false,
            phonetic_soundex: true,
            phonetic_nysiis: true,
        }
    }

    /// Nothing enabled
    #[must_use]
    pub fn none() -> Self {
        Self {
            sequence_ratio: false,
            levenshtein_ratio: false,
            sorensen: false,
            jaccard: false,
            phonetic_soundex: false,
            phonetic_nysiis: false,
        }
    }

    #[must_use]
    pub fn is_enabled(&self, metric: Metric) -> bool {
        match metric {
            Metric::SequenceRatio => self.sequence_ratio,
            Metric::LevenshteinRatio => self.levenshtein_ratio,
            Metric::Sorensen => self.sorensen,
            Metric::Jaccard => self.jaccard,
            Metric::Soundex => self.phonetic_soundex,
            Metric::Nysiis => self.phonetic_nysiis,
        }
    }

    pub fn set(&mut self, metric: Metric, enabled: bool) {
        let slot = match metric {
            Metric::SequenceRatio => &mut self.sequence_ratio,
            Metric::LevenshteinRatio => &mut self.levenshtein_ratio,
            Metric::Sorensen => &mut self.sorensen,
            Metric::Jaccard => &mut self.jaccard,
            Metric::Soundex => &mut self.phonetic_soundex,
            Metric::Nysiis => &mut self.phonetic_nysiis,
        };
        *slot = enabled;
    }

    /// Requested metrics in evaluation order
    pub fn enabled(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL.into_iter().filter(|&m| self.is_enabled(m))
    }
}

/// Per-metric weights for the weighted mean. Defaults to 1 for every metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricWeights {
    pub sequence_ratio: f64,
    pub levenshtein_ratio: f64,
    pub sorensen: f64,
    pub jaccard: f64,
    pub soundex: f64,
    pub nysiis: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

impl MetricWeights {
    #[must_use]
    pub fn uniform(weight: f64) -> Self {
        Self {
            sequence_ratio: weight,
            levenshtein_ratio: weight,
            sorensen: weight,
            jaccard: weight,
            soundex: weight,
            nysiis: weight,
        }
    }

    #[must_use]
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::SequenceRatio => self.sequence_ratio,
            Metric::LevenshteinRatio => self.levenshtein_ratio,
            Metric::Sorensen => self.sorensen,
            Metric::Jaccard => self.jaccard,
            Metric::Soundex => self.soundex,
            Metric::Nysiis => self.nysiis,
        }
    }

    #[must_use]
    pub fn with(mut self, metric: Metric, weight: f64) -> Self {
        let slot = match metric {
            Metric::SequenceRatio => &mut self.sequence_ratio,
            Metric::LevenshteinRatio => &mut self.levenshtein_ratio,
            Metric::Sorensen => &mut self.sorensen,
            Metric::Jaccard => &mut self.jaccard,
            Metric::Soundex => &mut self.soundex,
            Metric::Nysiis => &mut self.nysiis,
        };
        *slot = weight;
        self
    }
}

/// Full configuration of a similarity computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Metrics to blend
    pub metrics: MetricToggles,
    /// Weight of each metric in the mean
    pub weights: MetricWeights,
    /// Normalization of the Levenshtein ratio and phonetic-code comparisons
    pub edit_normalization: EditNormalization,
    /// N-gram extraction for Sørensen and Jaccard
    pub ngram: NgramConfig,
    /// Soundex rule set
    pub soundex_variant: SoundexVariant,
    /// Truncation of NYSIIS codes (`None` keeps the full code)
    pub nysiis_max_length: Option<usize>,
    /// Input preprocessing; `None` compares the literal strings
    pub normalization: Option<NormalizationMode>,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self::for_capabilities(&Capabilities::detect())
    }
}

impl SimilarityConfig {
    /// Every available metric, uniform weights
    #[must_use]
    pub fn for_capabilities(capabilities: &Capabilities) -> Self {
        Self::with_metrics(MetricToggles::for_capabilities(capabilities))
    }

    /// Graphemic metrics only
    #[must_use]
    pub fn graphemic() -> Self {
        Self::with_metrics(MetricToggles::graphemic())
    }

    /// Phonetic metrics only
    #[must_use]
    pub fn phonetic() -> Self {
        Self::with_metrics(MetricToggles::phonetic())
    }

    #[must_use]
    pub fn with_metrics(metrics: MetricToggles) -> Self {
        Self {
            metrics,
            weights: MetricWeights::default(),
            edit_normalization: EditNormalization::RatioShortest,
            ngram: NgramConfig::default(),
            soundex_variant: SoundexVariant::American,
            nysiis_max_length: None,
            normalization: None,
        }
    }

    #[must_use]
    pub fn with_weights(mut self, weights: MetricWeights) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn with_edit_normalization(mut self, normalization: EditNormalization) -> Self {
        self.edit_normalization = normalization;
        self
    }

    #[must_use]
    pub fn with_ngram(mut self, ngram: NgramConfig) -> Self {
        self.ngram = ngram;
        self
    }

    #[must_use]
    pub fn with_soundex_variant(mut self, variant: SoundexVariant) -> Self {
        self.soundex_variant = variant;
        self
    }

    #[must_use]
    pub fn with_nysiis_max_length(mut self, max_length: Option<usize>) -> Self {
        self.nysiis_max_length = max_length;
        self
    }

    #[must_use]
    pub fn with_normalization(mut self, mode: Option<NormalizationMode>) -> Self {
        self.normalization = mode;
        self
    }

    /// Turn a single metric on or off
    #[must_use]
    pub fn toggle(mut self, metric: Metric, enabled: bool) -> Self {
        self.metrics.set(metric, enabled);
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SimilarityError::invalid(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if !self.edit_normalization.is_ratio() {
            return Err(SimilarityError::invalid(
                "edit_normalization must be ratio-shortest or ratio-longest to blend",
            ));
        }
        if self.ngram.n == 0 {
            return Err(SimilarityError::invalid("ngram.n must be at least 1"));
        }
        if self.nysiis_max_length == Some(0) {
            return Err(SimilarityError::invalid("nysiis_max_length must be at least 1"));
        }
        let mut total = 0.0;
        for metric in Metric::ALL {
            let weight = self.weights.get(metric);
            if !weight.is_finite() || weight < 0.0 {
                return Err(SimilarityError::invalid(format!(
                    "weight for {metric} must be a finite non-negative number, got {weight}"
                )));
            }
            total += weight;
        }
        if !total.is_finite() {
            return Err(SimilarityError::invalid("metric weights overflow when summed"));
        }
        Ok(())
    }
}
