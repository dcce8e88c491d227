//! Error types for binning.

use thiserror::Error;

/// Errors returned by [`crate::BoxBinner`] and [`crate::compute_bins`].
///
/// Every variant is a caller mistake; no partial result is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BinError {
    /// The x and y arrays are not index-aligned.
    #[error("invalid input: xs has {xs} values but ys has {ys}")]
    LengthMismatch {
        /// Length of the x array.
        xs: usize,
        /// Length of the y array.
        ys: usize,
    },

    /// The requested bin count was zero.
    #[error("invalid input: bin count must be at least 1")]
    ZeroBinCount,

    /// The domain override is not a finite, ordered interval.
    #[error("invalid input: domain [{min}, {max}] must be finite with min <= max")]
    InvalidDomain {
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },

    /// Explicit thresholds contain a non-finite value.
    #[error("invalid input: thresholds must be finite")]
    InvalidThresholds,

    /// The whisker factor is negative or not finite.
    #[error("invalid input: whisker factor {0} must be finite and non-negative")]
    InvalidWhiskerFactor(f64),
}

impl BinError {
    /// Whether this error stems from malformed caller input.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. }
                | Self::ZeroBinCount
                | Self::InvalidDomain { .. }
                | Self::InvalidThresholds
                | Self::InvalidWhiskerFactor(_)
        )
    }
}
