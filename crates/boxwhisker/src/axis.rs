//! Axis painting and tick label formatting.

use boxwhisker_core::{
    tick_increment, Canvas, Color, LinearScale, Point, TextAnchor, TextStyle, Transform2D,
};
use serde::{Deserialize, Serialize};

/// Length of tick marks in pixels.
pub const TICK_SIZE: f32 = 6.0;

/// Gap between a tick mark and its label.
pub const TICK_PADDING: f32 = 3.0;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Side of the plot an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrient {
    /// Vertical axis, labels to the left
    Left,
    /// Horizontal axis, labels below
    Bottom,
}

/// How tick values are turned into labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickFormat {
    /// Plain numbers with as many decimals as the tick step needs
    #[default]
    Number,
    /// Epoch milliseconds as `%Y-%m-%d` in UTC
    Date,
}

impl TickFormat {
    /// Label for `value` on an axis whose ticks are `step` apart.
    #[must_use]
    pub fn format(self, value: f64, step: f64) -> String {
        match self {
            Self::Number => format_number(value, step),
            Self::Date => format_date(value),
        }
    }
}

/// Format `value` with the decimals needed to tell ticks `step` apart.
#[must_use]
pub fn format_number(value: f64, step: f64) -> String {
    let decimals = if step.is_finite() && step > 0.0 && step < 1.0 {
        (-step.log10() - 1e-9).ceil().clamp(0.0, 15.0) as usize
    } else {
        0
    };
    let text = format!("{value:.decimals$}");
    // "-0" and "-0.00" read as zero
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

/// Format epoch milliseconds as a UTC `YYYY-MM-DD` date.
#[must_use]
pub fn format_date(epoch_ms: f64) -> String {
    if !epoch_ms.is_finite() {
        return String::new();
    }
    let (year, month, day) = civil_from_days((epoch_ms / MS_PER_DAY).floor() as i64);
    format!("{year:04}-{month:02}-{day:02}")
}

/// Proleptic Gregorian date of a day count since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// An axis over one scale.
#[derive(Debug, Clone)]
pub struct Axis<'a> {
    scale: &'a LinearScale,
    orient: AxisOrient,
    tick_count: usize,
    offset: f32,
    format: TickFormat,
    outer_ticks: bool,
    style: TextStyle,
}

impl<'a> Axis<'a> {
    /// Vertical axis with labels on the left.
    #[must_use]
    pub fn left(scale: &'a LinearScale) -> Self {
        Self::new(scale, AxisOrient::Left)
    }

    /// Horizontal axis with labels below.
    #[must_use]
    pub fn bottom(scale: &'a LinearScale) -> Self {
        Self::new(scale, AxisOrient::Bottom)
    }

    fn new(scale: &'a LinearScale, orient: AxisOrient) -> Self {
        let anchor = match orient {
            AxisOrient::Left => TextAnchor::End,
            AxisOrient::Bottom => TextAnchor::Middle,
        };
        Self {
            scale,
            orient,
            tick_count: 10,
            offset: 0.0,
            format: TickFormat::Number,
            outer_ticks: true,
            style: TextStyle {
                size: 10.0,
                anchor,
                ..TextStyle::default()
            },
        }
    }

    /// Approximate number of ticks.
    #[must_use]
    pub const fn ticks(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    /// Distance from the canvas edge perpendicular to the axis.
    #[must_use]
    pub const fn offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Label format.
    #[must_use]
    pub const fn format(mut self, format: TickFormat) -> Self {
        self.format = format;
        self
    }

    /// Draw end caps at both ends of the domain line.
    #[must_use]
    pub const fn outer_ticks(mut self, show: bool) -> Self {
        self.outer_ticks = show;
        self
    }

    /// Line and label color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    /// Label font size.
    #[must_use]
    pub const fn font_size(mut self, size: f32) -> Self {
        self.style.size = size;
        self
    }

    /// Orientation.
    #[must_use]
    pub const fn orient(&self) -> AxisOrient {
        self.orient
    }

    /// Tick values in domain order.
    #[must_use]
    pub fn tick_values(&self) -> Vec<f64> {
        self.scale.ticks(self.tick_count)
    }

    /// Tick values paired with their labels.
    #[must_use]
    pub fn labels(&self) -> Vec<(f64, String)> {
        let (d0, d1) = self.scale.domain();
        let step = tick_increment(d0.min(d1), d0.max(d1), self.tick_count)
            .map_or(1.0, |step| step.value());
        self.tick_values()
            .into_iter()
            .map(|v| (v, self.format.format(v, step)))
            .collect()
    }

    /// Paint the domain line, tick marks and labels.
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        let (r0, r1) = self.scale.range();
        let (r0, r1) = (r0 as f32, r1 as f32);
        let color = self.style.color;
        let outer = if self.outer_ticks { TICK_SIZE } else { 0.0 };
        let labels = self.labels();

        match self.orient {
            AxisOrient::Left => {
                canvas.push_transform(Transform2D::translate(self.offset, 0.0));
                canvas.draw_line(Point::new(0.0, r0), Point::new(0.0, r1), color, 1.0);
                if outer > 0.0 {
                    canvas.draw_line(Point::new(-outer, r0), Point::new(0.0, r0), color, 1.0);
                    canvas.draw_line(Point::new(-outer, r1), Point::new(0.0, r1), color, 1.0);
                }
                for (value, label) in &labels {
                    let y = self.scale.px(*value);
                    canvas.draw_line(Point::new(-TICK_SIZE, y), Point::new(0.0, y), color, 1.0);
                    let position =
                        Point::new(-(TICK_SIZE + TICK_PADDING), self.style.size.mul_add(0.32, y));
                    canvas.draw_text(label, position, &self.style);
                }
            }
            AxisOrient::Bottom => {
                canvas.push_transform(Transform2D::translate(0.0, self.offset));
                canvas.draw_line(Point::new(r0, 0.0), Point::new(r1, 0.0), color, 1.0);
                if outer > 0.0 {
                    canvas.draw_line(Point::new(r0, 0.0), Point::new(r0, outer), color, 1.0);
                    canvas.draw_line(Point::new(r1, 0.0), Point::new(r1, outer), color, 1.0);
                }
                for (value, label) in &labels {
                    let x = self.scale.px(*value);
                    canvas.draw_line(Point::new(x, 0.0), Point::new(x, TICK_SIZE), color, 1.0);
                    let position = Point::new(x, TICK_SIZE + TICK_PADDING + self.style.size);
                    canvas.draw_text(label, position, &self.style);
                }
            }
        }
        canvas.pop_transform();
    }
}
