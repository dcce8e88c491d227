//! The box-plot panel: shared scales, one layer per series, axes and text.

use crate::axis::{Axis, TickFormat};
use crate::error::PanelError;
use crate::frame::{DataFrame, PanelData};
use crate::layer::{BoxPlotLayer, JitterSource, NoJitter, RandomJitter};
use boxwhisker_core::{
    classic_color, extent, gradient_colors, BinBox, BoxBinner, Canvas, Color, ColorResolver,
    Gradient, LinearScale, Point, SeriesColorMode, TextStyle, Theme, Typography,
};
use boxwhisker_yaml::{BoxplotType, PanelOptions};
use log::{debug, warn};
use std::fmt;

/// Vertical space reserved below the chart for the x axis.
pub const PADDING: f64 = 60.0;

/// Horizontal position of the y axis.
pub const Y_AXIS_OFFSET: f32 = 40.0;

/// Pixels of panel height per y-axis tick.
pub const Y_TICK_SPACING: f64 = 40.0;

/// Inset of the text box from the bottom-left corner.
pub const TEXT_BOX_PADDING: f32 = 10.0;

const LINE_HEIGHT: f32 = 1.2;

/// Where outlier jitter comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Jitter {
    /// Outliers sit on the bin center
    None,
    /// Reproducible offsets
    Seeded(u64),
    /// Fresh offsets on every paint
    #[default]
    Random,
}

impl Jitter {
    fn source(self) -> Box<dyn JitterSource> {
        match self {
            Self::None => Box::new(NoJitter),
            Self::Seeded(seed) => Box::new(RandomJitter::seeded(seed)),
            Self::Random => Box::new(RandomJitter::from_entropy()),
        }
    }
}

/// Binned boxes of one plotted series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesGeometry<'a> {
    /// Index of the frame in the panel data
    pub index: usize,
    /// Ref id plus value field name
    pub key: String,
    /// Fill color
    pub color: Color,
    /// Y values the bin indices point into
    pub ys: &'a [f64],
    /// Bins in ascending x
    pub bins: Vec<BinBox>,
}

/// Everything computed for one paint.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelGeometry<'a> {
    /// Time or series x scale, pixel-rounded
    pub x_scale: LinearScale,
    /// Value scale with an inverted range
    pub y_scale: LinearScale,
    /// Height of the plotting area
    pub chart_height: f64,
    /// Plotted series, skipped frames excluded
    pub series: Vec<SeriesGeometry<'a>>,
}

/// Box-plot panel.
///
/// ```
/// use boxwhisker::{BoxPlotPanel, DataFrame, Field, Jitter, PanelData};
/// use boxwhisker_core::RecordingCanvas;
/// use boxwhisker_yaml::PanelOptions;
///
/// let frame = DataFrame::new("A")
///     .field(Field::time("time", vec![0.0, 1.0, 2.0, 3.0]))
///     .field(Field::number("value", vec![4.0, 8.0, 15.0, 16.0]));
/// let data = PanelData::new(vec![frame]);
///
/// let panel = BoxPlotPanel::new(PanelOptions::default())
///     .layout(400.0, 300.0)
///     .jitter(Jitter::None);
/// let mut canvas = RecordingCanvas::new();
/// let geometry = panel.paint(&mut canvas, &data).expect("valid panel");
///
/// assert_eq!(geometry.series.len(), 1);
/// assert!(!canvas.is_empty());
/// ```
pub struct BoxPlotPanel {
    options: PanelOptions,
    theme: Option<Theme>,
    resolver: Option<Box<dyn ColorResolver>>,
    jitter: Jitter,
    width: f64,
    height: f64,
}

impl fmt::Debug for BoxPlotPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxPlotPanel")
            .field("options", &self.options)
            .field("theme", &self.theme.as_ref().map(|t| t.name.as_str()))
            .field("custom_resolver", &self.resolver.is_some())
            .field("jitter", &self.jitter)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl BoxPlotPanel {
    /// Panel with the theme selected in `options`.
    #[must_use]
    pub fn new(options: PanelOptions) -> Self {
        let theme = options.theme.theme();
        Self {
            options,
            theme,
            resolver: None,
            jitter: Jitter::default(),
            width: 0.0,
            height: 0.0,
        }
    }

    /// Replace the theme.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Paint without a theme.
    #[must_use]
    pub fn without_theme(mut self) -> Self {
        self.theme = None;
        self
    }

    /// Choose series colors with `resolver` instead of the color mode.
    #[must_use]
    pub fn color_resolver(mut self, resolver: impl ColorResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Outlier jitter.
    #[must_use]
    pub const fn jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Panel size in pixels.
    #[must_use]
    pub const fn layout(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Panel options.
    #[must_use]
    pub const fn options(&self) -> &PanelOptions {
        &self.options
    }

    /// Bin every plottable series and build the shared scales.
    ///
    /// Frames without a time and a number field are skipped.
    pub fn compute<'d>(&self, data: &'d PanelData) -> Result<PanelGeometry<'d>, PanelError> {
        self.options.validate()?;
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(PanelError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }

        let (x_domain, y_domain) = extrema(&data.series);
        let chart_height = (self.height - PADDING).max(0.0);
        let x_scale = LinearScale::new(x_domain, (0.0, self.width)).rounded();
        let y_scale = LinearScale::new(y_domain, (chart_height, 0.0));

        let binner = BoxBinner::new(self.options.threshold_num);
        let mut series = Vec::with_capacity(data.series.len());
        for (index, frame) in data.series.iter().enumerate() {
            let Some((xs, ys)) = frame.xy() else {
                warn!(
                    "skipping series {index} ({:?}): needs a time field and a number field",
                    frame.ref_id
                );
                continue;
            };
            let bins = binner
                .bin(xs, ys)
                .map_err(|source| PanelError::Bin { series: index, source })?;
            series.push(SeriesGeometry {
                index,
                key: frame.series_key().unwrap_or_default(),
                color: Color::BLACK,
                ys,
                bins,
            });
        }

        let colors = self.series_colors(&series);
        for (s, color) in series.iter_mut().zip(colors) {
            s.color = color;
        }

        debug!(
            "panel {}x{}: x {:?}, y {:?}, {} of {} series plotted",
            self.width,
            self.height,
            x_domain,
            y_domain,
            series.len(),
            data.series.len()
        );

        Ok(PanelGeometry {
            x_scale,
            y_scale,
            chart_height,
            series,
        })
    }

    /// Paint the whole panel and return what was computed for it.
    pub fn paint<'d>(
        &self,
        canvas: &mut dyn Canvas,
        data: &'d PanelData,
    ) -> Result<PanelGeometry<'d>, PanelError> {
        let geometry = self.compute(data)?;
        let (foreground, axis_color, text_color) = self.theme.as_ref().map_or(
            (Color::BLACK, Color::BLACK, Color::BLACK),
            |t| (t.colors.foreground, t.colors.axis, t.colors.text),
        );
        let typography = self.typography();

        let mut jitter = self.jitter.source();
        for series in &geometry.series {
            BoxPlotLayer::new(&series.bins, series.ys, &geometry.x_scale, &geometry.y_scale)
                .fill(series.color)
                .foreground(foreground)
                .paint(canvas, jitter.as_mut());
        }

        Axis::left(&geometry.y_scale)
            .ticks((self.height / Y_TICK_SPACING) as usize)
            .offset(Y_AXIS_OFFSET)
            .color(axis_color)
            .font_size(typography.axis)
            .paint(canvas);

        let format = match self.options.boxplot_type {
            BoxplotType::Time => TickFormat::Date,
            BoxplotType::Series => TickFormat::Number,
        };
        Axis::bottom(&geometry.x_scale)
            .ticks(self.options.threshold_num)
            .offset(geometry.chart_height as f32)
            .outer_ticks(false)
            .format(format)
            .color(axis_color)
            .font_size(typography.axis)
            .paint(canvas);

        self.paint_text_box(canvas, data.series.len(), text_color, &typography);
        Ok(geometry)
    }

    fn typography(&self) -> Typography {
        self.theme
            .as_ref()
            .map_or_else(Typography::default, |t| t.typography)
    }

    fn series_colors(&self, series: &[SeriesGeometry<'_>]) -> Vec<Color> {
        if let Some(resolver) = &self.resolver {
            return series.iter().map(|s| resolver.series_color(s.index)).collect();
        }
        let Some(theme) = &self.theme else {
            return series.iter().map(|s| classic_color(s.index)).collect();
        };
        match self.options.color_mode {
            SeriesColorMode::Palette => series.iter().map(|s| theme.series_color(s.index)).collect(),
            SeriesColorMode::ContinuousGrYlRd { by } => {
                let values: Vec<Option<f64>> = series.iter().map(|s| by.reduce(s.ys)).collect();
                gradient_colors(&Gradient::green_yellow_red(), &values)
            }
        }
    }

    fn paint_text_box(
        &self,
        canvas: &mut dyn Canvas,
        series_count: usize,
        color: Color,
        typography: &Typography,
    ) {
        let mut lines = Vec::with_capacity(2);
        if self.options.show_series_count {
            let fallback = Theme::default();
            let theme = self.theme.as_ref().unwrap_or(&fallback);
            let size = self.options.series_count_size.font_size(theme);
            lines.push((format!("Number of series: {series_count}"), size));
        }
        lines.push((
            format!("Text option value: {}", self.options.text),
            typography.md,
        ));

        let mut baseline = self.height as f32 - TEXT_BOX_PADDING;
        for (text, size) in lines.iter().rev() {
            let style = TextStyle {
                size: *size,
                color,
                ..TextStyle::default()
            };
            canvas.draw_text(text, Point::new(TEXT_BOX_PADDING, baseline), &style);
            baseline -= size * LINE_HEIGHT;
        }
    }
}

/// Finite x and y extrema across all frames, `(0, 0)` where none exist.
fn extrema(frames: &[DataFrame]) -> ((f64, f64), (f64, f64)) {
    let pairs: Vec<(&[f64], &[f64])> = frames.iter().filter_map(DataFrame::xy).collect();
    let x = extent(pairs.iter().flat_map(|(xs, _)| xs.iter().copied()));
    let y = extent(pairs.iter().flat_map(|(_, ys)| ys.iter().copied()));
    (x.unwrap_or((0.0, 0.0)), y.unwrap_or((0.0, 0.0)))
}
