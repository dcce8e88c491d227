//! Themes and series color selection.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Classic dashboard series palette, `0xRRGGBB`.
pub const CLASSIC_PALETTE: [u32; 24] = [
    0x7E_B2_6D, 0xEA_B8_39, 0x6E_D0_E0, 0xEF_84_3C, 0xE2_4D_42, 0x1F_78_C1, 0xBA_43_A9, 0x70_5D_A0,
    0x50_86_42, 0xCC_A3_00, 0x44_7E_BC, 0xC1_5C_17, 0x89_0F_02, 0x0A_43_7C, 0x6D_1F_62, 0x58_44_77,
    0xB7_DB_AB, 0xF4_D5_98, 0x70_DB_ED, 0xF9_BA_8F, 0xF2_91_91, 0x82_B5_D8, 0xE5_A8_E2, 0xAE_A2_E0,
];

/// Color of series `index` in the classic palette, wrapping around.
#[must_use]
pub fn classic_color(index: usize) -> Color {
    Color::from_rgb_u32(CLASSIC_PALETTE[index % CLASSIC_PALETTE.len()])
}

/// Chooses the fill color of each plotted series.
pub trait ColorResolver {
    /// Color for the series at `series_index`.
    fn series_color(&self, series_index: usize) -> Color;
}

impl<F> ColorResolver for F
where
    F: Fn(usize) -> Color,
{
    fn series_color(&self, series_index: usize) -> Color {
        self(series_index)
    }
}

/// Non-series colors of a theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Strokes drawn in the current foreground (whiskers, medians)
    pub foreground: Color,
    /// Panel background
    pub background: Color,
    /// Text color
    pub text: Color,
    /// Axis lines and tick labels
    pub axis: Color,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::light()
    }
}

impl ColorPalette {
    /// Create a light color palette.
    #[must_use]
    pub fn light() -> Self {
        Self {
            foreground: Color::new(0.13, 0.13, 0.13, 1.0), // Dark gray
            background: Color::WHITE,
            text: Color::new(0.13, 0.13, 0.13, 1.0),
            axis: Color::new(0.4, 0.4, 0.4, 1.0),
        }
    }

    /// Create a dark color palette.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            foreground: Color::new(0.85, 0.85, 0.85, 1.0),
            background: Color::new(0.07, 0.07, 0.07, 1.0), // Near black
            text: Color::WHITE,
            axis: Color::new(0.6, 0.6, 0.6, 1.0),
        }
    }
}

/// Font sizes used by the panel text box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    /// Small text
    pub sm: f32,
    /// Medium text
    pub md: f32,
    /// Large text
    pub lg: f32,
    /// Axis tick labels
    pub axis: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            sm: 12.0,
            md: 14.0,
            lg: 18.0,
            axis: 10.0,
        }
    }
}

/// Complete theme definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name
    pub name: String,
    /// Color palette
    pub colors: ColorPalette,
    /// Typography
    pub typography: Typography,
    /// Series colors, used in order and wrapped
    pub series: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Create a light theme.
    #[must_use]
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ColorPalette::light(),
            typography: Typography::default(),
            series: CLASSIC_PALETTE.iter().map(|&c| Color::from_rgb_u32(c)).collect(),
        }
    }

    /// Create a dark theme.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ColorPalette::dark(),
            ..Self::light()
        }
    }

    /// Create a theme with a custom name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Create a theme with custom series colors.
    #[must_use]
    pub fn with_series(mut self, series: Vec<Color>) -> Self {
        self.series = series;
        self
    }

    /// Series color from this theme's palette, wrapping around.
    ///
    /// Falls back to the classic palette when the theme has no series colors.
    #[must_use]
    pub fn series_color(&self, index: usize) -> Color {
        if self.series.is_empty() {
            classic_color(index)
        } else {
            self.series[index % self.series.len()]
        }
    }
}

/// Three-stop green-yellow-red gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    /// Color at 0.0
    pub low: Color,
    /// Color at 0.5
    pub mid: Color,
    /// Color at 1.0
    pub high: Color,
}

impl Default for Gradient {
    fn default() -> Self {
        Self::green_yellow_red()
    }
}

impl Gradient {
    /// Green to yellow to red.
    #[must_use]
    pub fn green_yellow_red() -> Self {
        Self {
            low: Color::from_rgb_u32(0x73_BF_69),
            mid: Color::from_rgb_u32(0xFA_DE_2A),
            high: Color::from_rgb_u32(0xF2_49_5C),
        }
    }

    /// Color at position `t`, clamped to `[0, 1]`. NaN maps to the low stop.
    #[must_use]
    pub fn at(&self, t: f64) -> Color {
        let t = (if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }) as f32;
        if t <= 0.5 {
            self.low.lerp(&self.mid, t * 2.0)
        } else {
            self.mid.lerp(&self.high, (t - 0.5) * 2.0)
        }
    }
}

/// Statistic a series is reduced to for continuous coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesBy {
    /// Smallest finite value
    #[default]
    Min,
    /// Largest finite value
    Max,
    /// Arithmetic mean of finite values
    Mean,
    /// Last finite value
    Last,
}

impl SeriesBy {
    /// Reduce `values` to one number, ignoring non-finite entries.
    #[must_use]
    pub fn reduce(self, values: &[f64]) -> Option<f64> {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        match self {
            Self::Min => finite.reduce(f64::min),
            Self::Max => finite.reduce(f64::max),
            Self::Last => finite.last(),
            Self::Mean => {
                let (sum, n) = finite.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
                (n > 0).then(|| sum / n as f64)
            }
        }
    }
}

/// How series fill colors are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum SeriesColorMode {
    /// Theme palette indexed by series position
    #[default]
    Palette,
    /// Green-yellow-red gradient over one statistic per series
    ContinuousGrYlRd {
        /// Statistic each series is reduced to
        #[serde(default)]
        by: SeriesBy,
    },
}

/// Gradient colors for series reduced to `values`.
///
/// Values are normalized across all finite entries; series without a value,
/// or a set where every value is equal, take the low stop.
#[must_use]
pub fn gradient_colors(gradient: &Gradient, values: &[Option<f64>]) -> Vec<Color> {
    let bounds = crate::quantile::extent(values.iter().flatten().copied());
    values
        .iter()
        .map(|value| match (value, bounds) {
            (Some(v), Some((lo, hi))) if hi > lo => gradient.at((v - lo) / (hi - lo)),
            _ => gradient.low,
        })
        .collect()
}
