//! Partitioning an x-domain into contiguous bins.
//!
//! A [`BinLayout`] holds `n + 1` ascending edges for `n` bins. Bin `i` is the
//! half-open interval `[edges[i], edges[i + 1])`, except the last bin which
//! also includes its right edge so the domain maximum always lands somewhere.

use crate::ticks::{nice, ticks};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How bin boundaries are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Thresholds {
    /// About `n` bins with boundaries on round tick values.
    ///
    /// When the domain comes from the data it is first extended outward to
    /// round bounds, so every bin has the same width.
    Nice(usize),
    /// Exactly `n` equal-width bins spanning the domain.
    Uniform(usize),
    /// Caller-supplied boundaries; values outside the domain are dropped.
    Explicit(Vec<f64>),
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::Nice(40)
    }
}

/// Ascending bin edges covering a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinLayout {
    edges: Vec<f64>,
}

impl BinLayout {
    /// Build the layout for a finite, ordered domain.
    ///
    /// `from_data` marks a domain taken from the observed extrema; only such
    /// domains are niced. A zero-width domain always yields one bin.
    #[must_use]
    pub fn build(thresholds: &Thresholds, min: f64, max: f64, from_data: bool) -> Self {
        if min == max {
            return Self {
                edges: vec![min, max],
            };
        }

        let (lo, hi, interior) = match thresholds {
            Thresholds::Nice(count) => {
                let (lo, hi) = if from_data {
                    let (lo, hi) = nice(min, max, *count);
                    (lo.min(min), hi.max(max))
                } else {
                    (min, max)
                };
                (lo, hi, ticks(lo, hi, *count))
            }
            Thresholds::Uniform(count) => {
                let count = (*count).max(1);
                let width = (max - min) / count as f64;
                let interior = (1..count)
                    .map(|i| (i as f64).mul_add(width, min))
                    .collect();
                (min, max, interior)
            }
            Thresholds::Explicit(values) => {
                let mut values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
                values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
                (min, max, values)
            }
        };

        let mut edges = Vec::with_capacity(interior.len() + 2);
        edges.push(lo);
        for t in interior {
            if t > lo && t < hi && edges.last().map_or(true, |&last| t > last) {
                edges.push(t);
            }
        }
        edges.push(hi);
        Self { edges }
    }

    /// Number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    /// Whether the layout has no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All edges, ascending.
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Lower and upper bound of the whole layout.
    #[must_use]
    pub fn domain(&self) -> Option<(f64, f64)> {
        Some((*self.edges.first()?, *self.edges.last()?))
    }

    /// Bounds of bin `index`.
    #[must_use]
    pub fn bounds(&self, index: usize) -> Option<(f64, f64)> {
        if index >= self.len() {
            return None;
        }
        Some((self.edges[index], self.edges[index + 1]))
    }

    /// Index of the bin containing `x`, or `None` outside the domain.
    #[must_use]
    pub fn locate(&self, x: f64) -> Option<usize> {
        let (lo, hi) = self.domain()?;
        if !(x >= lo && x <= hi) {
            return None;
        }
        let interior = &self.edges[1..self.edges.len() - 1];
        Some(interior.partition_point(|&edge| edge <= x))
    }
}
