//! Panel options loaded from YAML.

use crate::error::ParseError;
use boxwhisker_core::{SeriesColorMode, Theme};
use log::debug;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Default approximate bucket count.
pub const DEFAULT_THRESHOLD_NUM: usize = 40;

/// Accepted approximate bucket counts.
pub const THRESHOLD_NUM_RANGE: RangeInclusive<usize> = 2..=50;

/// Size of the series counter text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesCountSize {
    /// Small
    #[default]
    Sm,
    /// Medium
    Md,
    /// Large
    Lg,
}

impl SeriesCountSize {
    /// Font size in pixels under `theme`.
    #[must_use]
    pub fn font_size(self, theme: &Theme) -> f32 {
        match self {
            Self::Sm => theme.typography.sm,
            Self::Md => theme.typography.md,
            Self::Lg => theme.typography.lg,
        }
    }
}

/// What the x values represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxplotType {
    /// Epoch milliseconds, labelled as dates
    #[default]
    Time,
    /// Plain numbers
    Series,
}

/// Theme selection.
///
/// `None` paints without a theme: series fall back to the classic palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
    /// No theme
    None,
}

impl ThemeChoice {
    /// The selected theme, if any.
    #[must_use]
    pub fn theme(self) -> Option<Theme> {
        match self {
            Self::Light => Some(Theme::light()),
            Self::Dark => Some(Theme::dark()),
            Self::None => None,
        }
    }
}

/// Box-plot panel options.
///
/// ```yaml
/// text: Request latency
/// showSeriesCount: true
/// seriesCountSize: md
/// thresholdNum: 20
/// boxplotType: time
/// theme: dark
/// colorMode:
///   mode: continuous-gr-yl-rd
///   by: max
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelOptions {
    /// Free text shown under the chart
    pub text: String,
    /// Show the number of plotted series
    pub show_series_count: bool,
    /// Size of the series counter text
    pub series_count_size: SeriesCountSize,
    /// Approximate number of buckets
    #[serde(alias = "d3ThresholdNum")]
    pub threshold_num: usize,
    /// What the x values represent
    pub boxplot_type: BoxplotType,
    /// Theme
    pub theme: ThemeChoice,
    /// Series color mode
    pub color_mode: SeriesColorMode,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            text: "Default value of text input option".to_string(),
            show_series_count: false,
            series_count_size: SeriesCountSize::Sm,
            threshold_num: DEFAULT_THRESHOLD_NUM,
            boxplot_type: BoxplotType::Time,
            theme: ThemeChoice::Light,
            color_mode: SeriesColorMode::Palette,
        }
    }
}

impl PanelOptions {
    /// Parse and validate options from a YAML string.
    ///
    /// Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let options: Self = serde_yaml_ng::from_str(yaml)?;
        options.validate()?;
        debug!(
            "loaded panel options: {} buckets, {:?} axis",
            options.threshold_num, options.boxplot_type
        );
        Ok(options)
    }

    /// Serialize options to a YAML string.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ParseError> {
        if !THRESHOLD_NUM_RANGE.contains(&self.threshold_num) {
            return Err(ParseError::invalid(
                "thresholdNum",
                format!(
                    "{} is outside {}..={}",
                    self.threshold_num,
                    THRESHOLD_NUM_RANGE.start(),
                    THRESHOLD_NUM_RANGE.end()
                ),
            ));
        }
        Ok(())
    }

    /// Set the free text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Show the series counter at `size`.
    #[must_use]
    pub fn series_count(mut self, size: SeriesCountSize) -> Self {
        self.show_series_count = true;
        self.series_count_size = size;
        self
    }

    /// Set the approximate bucket count.
    #[must_use]
    pub fn threshold_num(mut self, count: usize) -> Self {
        self.threshold_num = count;
        self
    }

    /// Set the x-axis kind.
    #[must_use]
    pub fn boxplot_type(mut self, kind: BoxplotType) -> Self {
        self.boxplot_type = kind;
        self
    }

    /// Set the theme.
    #[must_use]
    pub fn theme(mut self, theme: ThemeChoice) -> Self {
        self.theme = theme;
        self
    }

    /// Set the series color mode.
    #[must_use]
    pub fn color_mode(mut self, mode: SeriesColorMode) -> Self {
        self.color_mode = mode;
        self
    }
}
