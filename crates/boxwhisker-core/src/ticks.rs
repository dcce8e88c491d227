//! Round tick values and "nice" domains.
//!
//! Steps are always `1`, `2`, `5` or `10` times a power of ten. Steps below
//! one are kept as their reciprocal so that values like `0.1` are produced
//! as `i / 10` instead of accumulating `i * 0.1` rounding error.

use serde::{Deserialize, Serialize};

const E10: f64 = 7.071_067_811_865_475; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

const MAX_NICE_ITERATIONS: usize = 16;

/// Spacing between consecutive ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TickStep {
    /// Ticks are `i * step` (step >= 1).
    Multiple(f64),
    /// Ticks are `i / divisor` (step = 1 / divisor < 1).
    Fraction(f64),
}

impl TickStep {
    /// Step size as a plain number.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Multiple(step) => step,
            Self::Fraction(divisor) => 1.0 / divisor,
        }
    }

    /// The `i`-th multiple of this step.
    #[must_use]
    pub fn tick(self, i: f64) -> f64 {
        match self {
            Self::Multiple(step) => i * step,
            Self::Fraction(divisor) => i / divisor,
        }
    }

    /// Largest multiple of the step not above `v`.
    #[must_use]
    pub fn floor(self, v: f64) -> f64 {
        match self {
            Self::Multiple(step) => (v / step).floor() * step,
            Self::Fraction(divisor) => (v * divisor).floor() / divisor,
        }
    }

    /// Smallest multiple of the step not below `v`.
    #[must_use]
    pub fn ceil(self, v: f64) -> f64 {
        match self {
            Self::Multiple(step) => (v / step).ceil() * step,
            Self::Fraction(divisor) => (v * divisor).ceil() / divisor,
        }
    }
}

/// Tick index range plus step; ticks are `step.tick(i)` for `i in i1..=i2`.
#[derive(Debug, Clone, Copy)]
struct TickRange {
    i1: f64,
    i2: f64,
    step: TickStep,
}

fn tick_range(start: f64, stop: f64, count: f64) -> Option<TickRange> {
    let raw = (stop - start) / count.max(0.0);
    let power = raw.log10().floor();
    if !power.is_finite() {
        return None;
    }
    let error = raw / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, step);
    if power < 0.0 {
        let divisor = 10f64.powf(-power) / factor;
        i1 = (start * divisor).round();
        i2 = (stop * divisor).round();
        if i1 / divisor < start {
            i1 += 1.0;
        }
        if i2 / divisor > stop {
            i2 -= 1.0;
        }
        step = TickStep::Fraction(divisor);
    } else {
        let inc = 10f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        step = TickStep::Multiple(inc);
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_range(start, stop, count * 2.0);
    }
    Some(TickRange { i1, i2, step })
}

/// Step that yields roughly `count` ticks across `[start, stop]`.
///
/// Returns `None` when no finite step exists (empty interval or zero count).
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> Option<TickStep> {
    tick_range(start, stop, count as f64).map(|range| range.step)
}

/// Roughly `count` round values inside `[start, stop]`.
///
/// Values are ascending, or descending when `stop < start`. A zero-width
/// interval yields the single value `start`.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let range = if reverse {
        tick_range(stop, start, count as f64)
    } else {
        tick_range(start, stop, count as f64)
    };
    let Some(TickRange { i1, i2, step }) = range else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    (0..n)
        .map(|i| {
            let offset = i as f64;
            if reverse {
                step.tick(i2 - offset)
            } else {
                step.tick(i1 + offset)
            }
        })
        .collect()
}

/// Extend `[start, stop]` outward to multiples of the tick step.
///
/// Repeats until the step no longer changes, so the returned domain is
/// itself aligned with [`ticks`] for the same `count`.
#[must_use]
pub fn nice(mut start: f64, mut stop: f64, count: usize) -> (f64, f64) {
    let mut previous: Option<TickStep> = None;
    for _ in 0..MAX_NICE_ITERATIONS {
        let Some(step) = tick_increment(start, stop, count) else {
            break;
        };
        if previous == Some(step) {
            break;
        }
        start = step.floor(start);
        stop = step.ceil(stop);
        previous = Some(step);
    }
    (start, stop)
}
