//! Quantiles and extents over numeric samples.
//!
//! Quantiles use linear interpolation between closest ranks: for `n` sorted
//! values the rank of probability `p` is `p * (n - 1)`, and a fractional rank
//! interpolates between its two neighbours.

use std::cmp::Ordering;

/// Quantile of already-sorted values.
///
/// `p` is clamped to `[0, 1]`. Returns `None` for an empty slice.
#[must_use]
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    if n == 1 || p == 0.0 {
        return Some(sorted[0]);
    }
    if p == 1.0 {
        return Some(sorted[n - 1]);
    }

    let rank = p * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(n - 1);
    let frac = rank - lower as f64;
    let v0 = sorted[lower];
    let v1 = sorted[upper];
    // Rounding must never push the result past its neighbours.
    Some((v1 - v0).mul_add(frac, v0).clamp(v0, v1))
}

/// Quantile of unsorted values, ignoring non-finite entries.
#[must_use]
pub fn quantile(values: &[f64], p: f64) -> Option<f64> {
    let sorted = sorted_finite(values.iter().copied());
    quantile_sorted(&sorted, p)
}

/// Minimum and maximum of the finite values.
#[must_use]
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Collect finite values in ascending order.
#[must_use]
pub fn sorted_finite(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}
