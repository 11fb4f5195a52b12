//! Error types for similarity computation

use thiserror::Error;

use crate::config::Metric;

/// Errors produced while encoding or scoring strings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    /// Input was empty or otherwise unusable where a value is required
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A metric was requested but its implementation is not compiled in
    /// or was disabled through [`Capabilities`](crate::Capabilities)
    #[error("Backend unavailable for metric '{0}'")]
    BackendUnavailable(Metric),

    /// Every requested metric was unavailable or not applicable
    #[error("No similarity metric could be computed for this configuration")]
    NoMetricAvailable,
}

impl SimilarityError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SimilarityError>;
