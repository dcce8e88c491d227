//! Binned box-plot summaries.
//!
//! [`BoxBinner`] groups paired `(x, y)` samples into x-bins and summarizes
//! the y-values of each bin with quartiles, a whisker range and outliers.
//!
//! # Example
//!
//! ```
//! use boxwhisker_core::compute_bins;
//!
//! let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let ys = [10.0, 20.0, 30.0, 40.0, 1000.0];
//! let bins = compute_bins(&xs, &ys, 1, None).expect("aligned input");
//!
//! assert_eq!(bins.len(), 1);
//! let summary = bins[0].summary.as_ref().expect("non-empty bin");
//! assert_eq!(summary.quartiles, [20.0, 30.0, 40.0]);
//! assert_eq!(summary.outliers, vec![4]);
//! ```

use crate::binning::{BinLayout, Thresholds};
use crate::error::BinError;
use crate::quantile::{extent, quantile_sorted, sorted_finite};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Default whisker length in multiples of the interquartile range.
pub const DEFAULT_WHISKER_FACTOR: f64 = 1.5;

/// Five-number-style summary of one bin's y-values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    /// First quartile, median and third quartile.
    pub quartiles: [f64; 3],
    /// Whisker bounds `[r0, r1]`.
    pub range: [f64; 2],
    /// Sample indices whose y lies strictly outside `range`, ascending.
    pub outliers: Vec<usize>,
}

impl BoxSummary {
    /// Summarize the y-values of `indices`.
    ///
    /// Returns `None` when `indices` is empty or selects no finite value.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds for `ys`.
    #[must_use]
    pub fn from_indices(indices: &[usize], ys: &[f64], whisker_factor: f64) -> Option<Self> {
        let sorted = sorted_finite(indices.iter().map(|&i| ys[i]));
        let (&min, &max) = (sorted.first()?, sorted.last()?);

        let q1 = quantile_sorted(&sorted, 0.25)?;
        let q2 = quantile_sorted(&sorted, 0.5)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let r0 = min.max(iqr.mul_add(-whisker_factor, q1));
        let r1 = max.min(iqr.mul_add(whisker_factor, q3));

        let outliers = indices
            .iter()
            .copied()
            .filter(|&i| ys[i] < r0 || ys[i] > r1)
            .collect();

        Some(Self {
            quartiles: [q1, q2, q3],
            range: [r0, r1],
            outliers,
        })
    }

    /// First quartile.
    #[must_use]
    pub const fn q1(&self) -> f64 {
        self.quartiles[0]
    }

    /// Median.
    #[must_use]
    pub const fn median(&self) -> f64 {
        self.quartiles[1]
    }

    /// Third quartile.
    #[must_use]
    pub const fn q3(&self) -> f64 {
        self.quartiles[2]
    }

    /// Interquartile range.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.quartiles[2] - self.quartiles[0]
    }
}

/// One x-interval with its member samples and their summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinBox {
    /// Inclusive lower bound.
    pub x0: f64,
    /// Upper bound; exclusive except for the last bin.
    pub x1: f64,
    /// Original sample indices in this bin, ascending.
    pub indices: Vec<usize>,
    /// Summary of the members' y-values; `None` for an empty bin.
    pub summary: Option<BoxSummary>,
}

impl BinBox {
    /// Midpoint of the interval.
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    /// Width of the interval.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Number of member samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the bin has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Builder for binned box-plot computation.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxBinner {
    thresholds: Thresholds,
    domain: Option<(f64, f64)>,
    whisker_factor: f64,
}

impl Default for BoxBinner {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            domain: None,
            whisker_factor: DEFAULT_WHISKER_FACTOR,
        }
    }
}

impl BoxBinner {
    /// Binner targeting about `approx_bin_count` bins on round boundaries.
    #[must_use]
    pub fn new(approx_bin_count: usize) -> Self {
        Self {
            thresholds: Thresholds::Nice(approx_bin_count),
            ..Self::default()
        }
    }

    /// Replace the threshold strategy.
    #[must_use]
    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Fix the x-domain instead of using the observed extrema.
    ///
    /// Samples outside the domain are left out of every bin.
    #[must_use]
    pub const fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = Some((min, max));
        self
    }

    /// Whisker length in multiples of the interquartile range.
    #[must_use]
    pub const fn whisker_factor(mut self, factor: f64) -> Self {
        self.whisker_factor = factor;
        self
    }

    fn validate(&self, xs: &[f64], ys: &[f64]) -> Result<(), BinError> {
        if xs.len() != ys.len() {
            return Err(BinError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        match &self.thresholds {
            Thresholds::Nice(0) | Thresholds::Uniform(0) => return Err(BinError::ZeroBinCount),
            Thresholds::Explicit(values) if values.iter().any(|v| !v.is_finite()) => {
                return Err(BinError::InvalidThresholds)
            }
            _ => {}
        }
        if let Some((min, max)) = self.domain {
            if !(min.is_finite() && max.is_finite() && min <= max) {
                return Err(BinError::InvalidDomain { min, max });
            }
        }
        if !(self.whisker_factor.is_finite() && self.whisker_factor >= 0.0) {
            return Err(BinError::InvalidWhiskerFactor(self.whisker_factor));
        }
        Ok(())
    }

    /// Bin `(xs[i], ys[i])` pairs and summarize each bin.
    ///
    /// Pairs with a non-finite coordinate are skipped. With no valid pairs
    /// the result is empty.
    pub fn bin(&self, xs: &[f64], ys: &[f64]) -> Result<Vec<BinBox>, BinError> {
        self.validate(xs, ys)?;

        let valid: Vec<usize> = (0..xs.len())
            .filter(|&i| xs[i].is_finite() && ys[i].is_finite())
            .collect();
        if valid.is_empty() {
            debug!("no valid samples among {} pairs", xs.len());
            return Ok(Vec::new());
        }

        let (min, max, from_data) = match self.domain {
            Some((min, max)) => (min, max, false),
            None => {
                let Some((min, max)) = extent(valid.iter().map(|&i| xs[i])) else {
                    return Ok(Vec::new());
                };
                (min, max, true)
            }
        };

        let layout = BinLayout::build(&self.thresholds, min, max, from_data);
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); layout.len()];
        for &i in &valid {
            if let Some(bin) = layout.locate(xs[i]) {
                members[bin].push(i);
            }
        }

        debug!(
            "binned {} of {} samples into {} bins over {:?}",
            valid.len(),
            xs.len(),
            layout.len(),
            layout.domain()
        );

        let bins = members
            .into_iter()
            .enumerate()
            .filter_map(|(index, indices)| {
                let (x0, x1) = layout.bounds(index)?;
                let summary = BoxSummary::from_indices(&indices, ys, self.whisker_factor);
                trace!(
                    "bin {index} [{x0}, {x1}]: {} samples, {} outliers",
                    indices.len(),
                    summary.as_ref().map_or(0, |s| s.outliers.len())
                );
                Some(BinBox {
                    x0,
                    x1,
                    indices,
                    summary,
                })
            })
            .collect();
        Ok(bins)
    }
}

/// Bin paired samples into about `approx_bin_count` box-plot bins.
///
/// `domain` fixes the x-range; otherwise the observed extrema are used and
/// extended to round boundaries.
pub fn compute_bins(
    xs: &[f64],
    ys: &[f64],
    approx_bin_count: usize,
    domain: Option<(f64, f64)>,
) -> Result<Vec<BinBox>, BinError> {
    let binner = BoxBinner::new(approx_bin_count);
    let binner = match domain {
        Some((min, max)) => binner.domain(min, max),
        None => binner,
    };
    binner.bin(xs, ys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn only_summary(bins: &[BinBox]) -> &BoxSummary {
        assert_eq!(bins.len(), 1, "expected a single bin, got {bins:?}");
        bins[0].summary.as_ref().expect("non-empty bin")
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    #[test]
    fn test_single_bin_with_high_outlier() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [10.0, 20.0, 30.0, 40.0, 1000.0];
        let bins = compute_bins(&xs, &ys, 1, None).unwrap();
        let summary = only_summary(&bins);

        assert_eq!(summary.quartiles, [20.0, 30.0, 40.0]);
        assert_eq!(summary.iqr(), 20.0);
        assert_eq!(summary.range, [10.0, 70.0]);
        assert_eq!(summary.outliers, vec![4]);
        assert_eq!(bins[0].indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_identical_values_have_zero_width_range() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [5.0; 4];
        let bins = compute_bins(&xs, &ys, 1, None).unwrap();
        let summary = only_summary(&bins);

        assert_eq!(summary.quartiles, [5.0, 5.0, 5.0]);
        assert_eq!(summary.range, [5.0, 5.0]);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn test_length_mismatch_is_invalid_input() {
        let err = compute_bins(&[1.0, 2.0], &[1.0], 10, None).unwrap_err();
        assert_eq!(err, BinError::LengthMismatch { xs: 2, ys: 1 });
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_zero_bin_count_is_invalid_input() {
        let err = compute_bins(&[1.0], &[1.0], 0, None).unwrap_err();
        assert_eq!(err, BinError::ZeroBinCount);
    }

    #[test]
    fn test_non_finite_pairs_are_skipped() {
        let xs = [f64::NAN, 1.0, 2.0];
        let ys = [1.0, f64::NAN, 3.0];
        let bins = compute_bins(&xs, &ys, 10, None).unwrap();
        let summary = only_summary(&bins);

        assert_eq!(bins[0].indices, vec![2]);
        assert_eq!(summary.quartiles, [3.0, 3.0, 3.0]);
        assert_eq!(summary.range, [3.0, 3.0]);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn test_no_valid_samples_yields_no_bins() {
        assert!(compute_bins(&[], &[], 5, None).unwrap().is_empty());
        let bins = compute_bins(&[f64::NAN], &[f64::INFINITY], 5, None).unwrap();
        assert!(bins.is_empty());
    }

    // =========================================================================
    // Binning behaviour
    // =========================================================================

    #[test]
    fn test_multiple_bins_keep_empty_gaps() {
        let xs = [0.5, 1.5, 9.5];
        let ys = [1.0, 2.0, 3.0];
        let bins = compute_bins(&xs, &ys, 10, None).unwrap();

        assert_eq!(bins.len(), 10);
        assert_eq!(bins[0].indices, vec![0]);
        assert_eq!(bins[1].indices, vec![1]);
        assert_eq!(bins[9].indices, vec![2]);
        assert!(bins[4].is_empty());
        assert!(bins[4].summary.is_none());
    }

    #[test]
    fn test_domain_override_excludes_outside_samples() {
        let xs = [-1.0, 0.0, 5.0, 10.0, 11.0];
        let ys = [1.0, 2.0, 3.0, 4.0, 5.0];
        let bins = compute_bins(&xs, &ys, 2, Some((0.0, 10.0))).unwrap();

        assert_eq!(bins.first().unwrap().x0, 0.0);
        assert_eq!(bins.last().unwrap().x1, 10.0);
        let kept: Vec<usize> = bins.iter().flat_map(|b| b.indices.clone()).collect();
        assert_eq!(kept, vec![1, 2, 3]);
    }

    #[test]
    fn test_invalid_domain_rejected() {
        let err = compute_bins(&[1.0], &[1.0], 3, Some((5.0, 1.0))).unwrap_err();
        assert_eq!(err, BinError::InvalidDomain { min: 5.0, max: 1.0 });
        let err = compute_bins(&[1.0], &[1.0], 3, Some((f64::NAN, 1.0))).unwrap_err();
        assert!(matches!(err, BinError::InvalidDomain { .. }));
    }

    #[test]
    fn test_uniform_thresholds() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 2.0, 3.0, 4.0];
        let bins = BoxBinner::default()
            .thresholds(Thresholds::Uniform(3))
            .bin(&xs, &ys)
            .unwrap();
        assert_eq!(bins.len(), 3);
        assert_eq!(bins[0].x0, 0.0);
        assert_eq!(bins[2].x1, 3.0);
        assert_eq!(bins[2].indices, vec![2, 3]);
    }

    #[test]
    fn test_explicit_thresholds() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [1.0; 5];
        let bins = BoxBinner::default()
            .thresholds(Thresholds::Explicit(vec![2.5]))
            .bin(&xs, &ys)
            .unwrap();
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].indices, vec![0, 1, 2]);
        assert_eq!(bins[1].indices, vec![3, 4]);

        let err = BoxBinner::default()
            .thresholds(Thresholds::Explicit(vec![f64::NAN]))
            .bin(&xs, &ys)
            .unwrap_err();
        assert_eq!(err, BinError::InvalidThresholds);
    }

    #[test]
    fn test_whisker_factor_zero_flags_everything_outside_box() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [1.0, 2.0, 3.0, 4.0, 5.0];
        let bins = BoxBinner::new(1).whisker_factor(0.0).bin(&xs, &ys).unwrap();
        let summary = only_summary(&bins);
        assert_eq!(summary.range, [2.0, 4.0]);
        assert_eq!(summary.outliers, vec![0, 4]);

        let err = BoxBinner::new(1).whisker_factor(-1.0).bin(&xs, &ys).unwrap_err();
        assert_eq!(err, BinError::InvalidWhiskerFactor(-1.0));
    }

    #[test]
    fn test_low_outlier() {
        let xs = [0.0; 6];
        let ys = [-500.0, 10.0, 11.0, 12.0, 13.0, 14.0];
        let bins = compute_bins(&xs, &ys, 4, None).unwrap();
        let summary = only_summary(&bins);
        assert_eq!(summary.outliers, vec![0]);
        assert!(summary.range[0] > -500.0);
    }

    #[test]
    fn test_bin_box_helpers() {
        let bin = BinBox {
            x0: 2.0,
            x1: 6.0,
            indices: vec![1, 3],
            summary: None,
        };
        assert_eq!(bin.center(), 4.0);
        assert_eq!(bin.width(), 4.0);
        assert_eq!(bin.len(), 2);
        assert!(!bin.is_empty());
    }

    #[test]
    fn test_summary_from_indices_subset() {
        let ys = [100.0, 1.0, f64::NAN, 2.0, 3.0];
        let summary = BoxSummary::from_indices(&[1, 2, 3, 4], &ys, 1.5).unwrap();
        assert_eq!(summary.median(), 2.0);
        assert!(summary.outliers.is_empty());
        assert!(BoxSummary::from_indices(&[], &ys, 1.5).is_none());
        assert!(BoxSummary::from_indices(&[2], &ys, 1.5).is_none());
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_summary_from_indices_out_of_range_panics() {
        let _ = BoxSummary::from_indices(&[0, 5], &[1.0, 2.0], 1.5);
    }

    #[test]
    fn test_bins_serialize_to_json() {
        let bins = compute_bins(&[1.0, 2.0], &[3.0, 4.0], 1, None).unwrap();
        let json = serde_json::to_value(&bins).unwrap();
        assert_eq!(json[0]["summary"]["quartiles"][1], 3.5);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    fn sample_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        prop::collection::vec(
            (
                prop_oneof![9 => -1e4f64..1e4, 1 => Just(f64::NAN)],
                prop_oneof![9 => -1e4f64..1e4, 1 => Just(f64::NAN)],
            ),
            0..120,
        )
        .prop_map(|pairs: Vec<(f64, f64)>| -> (Vec<f64>, Vec<f64>) { pairs.into_iter().unzip() })
    }

    proptest! {
        #[test]
        fn prop_quartile_ordering((xs, ys) in sample_strategy(), count in 1usize..50) {
            for bin in compute_bins(&xs, &ys, count, None).unwrap() {
                if let Some(s) = bin.summary {
                    prop_assert!(s.range[0] <= s.quartiles[0]);
                    prop_assert!(s.quartiles[0] <= s.quartiles[1]);
                    prop_assert!(s.quartiles[1] <= s.quartiles[2]);
                    prop_assert!(s.quartiles[2] <= s.range[1]);
                }
            }
        }

        #[test]
        fn prop_every_valid_sample_binned_once((xs, ys) in sample_strategy(), count in 1usize..50) {
            let bins = compute_bins(&xs, &ys, count, None).unwrap();
            let valid: BTreeSet<usize> = (0..xs.len())
                .filter(|&i| xs[i].is_finite() && ys[i].is_finite())
                .collect();
            let binned: Vec<usize> = bins.iter().flat_map(|b| b.indices.iter().copied()).collect();
            let unique: BTreeSet<usize> = binned.iter().copied().collect();
            prop_assert_eq!(binned.len(), unique.len());
            prop_assert_eq!(unique, valid);
        }

        #[test]
        fn prop_bins_contiguous_and_cover_domain((xs, ys) in sample_strategy(), count in 1usize..50) {
            let bins = compute_bins(&xs, &ys, count, None).unwrap();
            for pair in bins.windows(2) {
                prop_assert_eq!(pair[0].x1, pair[1].x0);
                prop_assert!(pair[0].x0 < pair[0].x1);
            }
            let valid_x: Vec<f64> = (0..xs.len())
                .filter(|&i| xs[i].is_finite() && ys[i].is_finite())
                .map(|i| xs[i])
                .collect();
            if let (Some(first), Some(last)) = (bins.first(), bins.last()) {
                for x in valid_x {
                    prop_assert!(x >= first.x0 && x <= last.x1);
                }
            }
        }

        #[test]
        fn prop_outliers_are_members_outside_range((xs, ys) in sample_strategy(), count in 1usize..50) {
            for bin in compute_bins(&xs, &ys, count, None).unwrap() {
                if let Some(s) = &bin.summary {
                    for &i in &s.outliers {
                        prop_assert!(bin.indices.contains(&i));
                        prop_assert!(ys[i] < s.range[0] || ys[i] > s.range[1]);
                    }
                    let inside = bin.indices.iter().filter(|&&i| ys[i] >= s.range[0] && ys[i] <= s.range[1]).count();
                    prop_assert_eq!(inside + s.outliers.len(), bin.len());
                }
            }
        }

        #[test]
        fn prop_idempotent((xs, ys) in sample_strategy(), count in 1usize..50) {
            let first = compute_bins(&xs, &ys, count, None).unwrap();
            let second = compute_bins(&xs, &ys, count, None).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
