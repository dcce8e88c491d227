//! Mapping from data space to pixel space.

use crate::ticks::{nice, ticks};
use serde::{Deserialize, Serialize};

/// Continuous linear mapping from a data domain to a pixel range.
///
/// An inverted range such as `[height, 0]` maps larger values upward, which
/// is what a y-axis in top-down pixel coordinates needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    round: bool,
}

impl LinearScale {
    /// Create a scale from `domain` to `range`.
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            round: false,
        }
    }

    /// Round mapped values to whole pixels.
    #[must_use]
    pub const fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    /// Data domain.
    #[must_use]
    pub const fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Pixel range.
    #[must_use]
    pub const fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a data value to pixel space.
    ///
    /// A zero-width domain maps every value to the middle of the range.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if d1 == d0 { 0.5 } else { (value - d0) / (d1 - d0) };
        let mapped = (r1 - r0).mul_add(t, r0);
        if self.round {
            mapped.round()
        } else {
            mapped
        }
    }

    /// Map a data value to pixel space as `f32`.
    #[must_use]
    pub fn px(&self, value: f64) -> f32 {
        self.apply(value) as f32
    }

    /// Map a pixel position back to the data domain.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        let t = (pixel - r0) / (r1 - r0);
        (d1 - d0).mul_add(t, d0)
    }

    /// About `count` round values inside the domain.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Copy with the domain extended to round bounds.
    #[must_use]
    pub fn nice(mut self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        self.domain = if d1 < d0 {
            let (lo, hi) = nice(d1, d0, count);
            (hi, lo)
        } else {
            nice(d0, d1, count)
        };
        self
    }
}
