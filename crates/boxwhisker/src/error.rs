//! Error types for panel painting.

use boxwhisker_core::BinError;
use boxwhisker_yaml::ParseError;
use thiserror::Error;

/// Error type for panel painting.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Binning one series failed
    #[error("series {series}: {source}")]
    Bin {
        /// Index of the series in the panel data
        series: usize,
        /// Underlying binning error
        #[source]
        source: BinError,
    },

    /// Panel options failed validation
    #[error("invalid panel options: {0}")]
    Options(#[from] ParseError),

    /// Width or height is negative or not finite
    #[error("invalid panel size {width}x{height}")]
    InvalidSize {
        /// Panel width
        width: f64,
        /// Panel height
        height: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_bin_error_display_and_source() {
        let err = PanelError::Bin {
            series: 2,
            source: BinError::LengthMismatch { xs: 3, ys: 1 },
        };
        assert!(err.to_string().starts_with("series 2: invalid input"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_options_error_from_parse_error() {
        let err: PanelError = ParseError::invalid("thresholdNum", "too small").into();
        assert_eq!(
            err.to_string(),
            "invalid panel options: Invalid value for 'thresholdNum': too small"
        );
    }

    #[test]
    fn test_invalid_size_display() {
        let err = PanelError::InvalidSize {
            width: -1.0,
            height: 10.0,
        };
        assert_eq!(err.to_string(), "invalid panel size -1x10");
    }
}
