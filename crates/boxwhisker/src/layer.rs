//! Painting one series of binned boxes.
//!
//! Each non-empty bin becomes a whisker line at the bin center, a filled box
//! between the first and third quartile, a median line, and a group of
//! translucent outlier dots translated to the bin center.

use boxwhisker_core::{BinBox, Canvas, Color, LinearScale, Point, Rect, Transform2D};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Radius of an outlier dot.
pub const OUTLIER_RADIUS: f32 = 2.0;

/// Fill alpha of outlier dots.
pub const OUTLIER_ALPHA: f32 = 0.2;

/// Total horizontal spread of outlier jitter.
pub const JITTER_WIDTH: f64 = 4.0;

/// Inset applied to each side of a box.
pub const BOX_INSET: f64 = 0.5;

/// Stroke width of the median line.
pub const MEDIAN_WIDTH: f32 = 2.0;

/// Horizontal offsets for outlier dots.
pub trait JitterSource {
    /// Next offset in pixels, within `[-JITTER_WIDTH / 2, JITTER_WIDTH / 2)`.
    fn next_offset(&mut self) -> f64;
}

/// Every outlier on the bin center.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn next_offset(&mut self) -> f64 {
        0.0
    }
}

/// Uniform random offsets.
#[derive(Debug, Clone)]
pub struct RandomJitter {
    rng: StdRng,
}

impl RandomJitter {
    /// Reproducible offsets from `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Offsets seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl JitterSource for RandomJitter {
    fn next_offset(&mut self) -> f64 {
        (self.rng.gen::<f64>() - 0.5) * JITTER_WIDTH
    }
}

/// Box-plot layer for one series.
#[derive(Debug, Clone, Copy)]
pub struct BoxPlotLayer<'a> {
    bins: &'a [BinBox],
    ys: &'a [f64],
    x: &'a LinearScale,
    y: &'a LinearScale,
    fill: Color,
    foreground: Color,
}

impl<'a> BoxPlotLayer<'a> {
    /// Layer over `bins`, whose indices point into `ys`.
    #[must_use]
    pub const fn new(
        bins: &'a [BinBox],
        ys: &'a [f64],
        x: &'a LinearScale,
        y: &'a LinearScale,
    ) -> Self {
        Self {
            bins,
            ys,
            x,
            y,
            fill: Color::BLACK,
            foreground: Color::BLACK,
        }
    }

    /// Series color for boxes and outliers.
    #[must_use]
    pub const fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    /// Stroke color for whiskers and medians.
    #[must_use]
    pub const fn foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    /// Paint every non-empty bin.
    pub fn paint(&self, canvas: &mut dyn Canvas, jitter: &mut dyn JitterSource) {
        let outlier_color = self.fill.with_alpha(OUTLIER_ALPHA);

        for bin in self.bins {
            let Some(summary) = &bin.summary else {
                continue;
            };
            let [q1, q2, q3] = summary.quartiles;
            let [r0, r1] = summary.range;
            let center = self.x.px(bin.center());
            let left = self.x.apply(bin.x0) + BOX_INSET;
            let right = self.x.apply(bin.x1) - BOX_INSET;

            canvas.draw_line(
                Point::new(center, self.y.px(r1)),
                Point::new(center, self.y.px(r0)),
                self.foreground,
                1.0,
            );

            canvas.fill_rect(
                Rect::from_points(
                    Point::new(left as f32, self.y.px(q3)),
                    Point::new(right as f32, self.y.px(q1)),
                ),
                self.fill,
            );

            let median = self.y.px(q2);
            canvas.draw_line(
                Point::new(left as f32, median),
                Point::new(right as f32, median),
                self.foreground,
                MEDIAN_WIDTH,
            );

            if summary.outliers.is_empty() {
                continue;
            }
            canvas.push_transform(Transform2D::translate(center, 0.0));
            for &i in &summary.outliers {
                let dot = Point::new(jitter.next_offset() as f32, self.y.px(self.ys[i]));
                canvas.fill_circle(dot, OUTLIER_RADIUS, outlier_color);
            }
            canvas.pop_transform();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxwhisker_core::{compute_bins, DrawCommand, RecordingCanvas};

    fn scales() -> (LinearScale, LinearScale) {
        (
            LinearScale::new((0.0, 5.0), (0.0, 500.0)),
            LinearScale::new((0.0, 1000.0), (1000.0, 0.0)),
        )
    }

    fn paint(bins: &[BinBox], ys: &[f64], jitter: &mut dyn JitterSource) -> Vec<DrawCommand> {
        let (x, y) = scales();
        let mut canvas = RecordingCanvas::new();
        BoxPlotLayer::new(bins, ys, &x, &y)
            .fill(Color::WHITE)
            .foreground(Color::BLACK)
            .paint(&mut canvas, jitter);
        canvas.take_commands()
    }

    // =========================================================================
    // Geometry Tests
    // =========================================================================

    #[test]
    fn test_single_bin_geometry() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [10.0, 20.0, 30.0, 40.0, 1000.0];
        let bins = compute_bins(&xs, &ys, 1, None).unwrap();
        let commands = paint(&bins, &ys, &mut NoJitter);

        assert_eq!(commands.len(), 4);
        match &commands[0] {
            DrawCommand::Path { points, style, .. } => {
                assert_eq!(points, &vec![Point::new(250.0, 930.0), Point::new(250.0, 990.0)]);
                assert_eq!(style.width, 1.0);
            }
            other => panic!("expected whisker, got {other:?}"),
        }
        match &commands[1] {
            DrawCommand::Rect { bounds, style } => {
                assert_eq!(*bounds, Rect::new(0.5, 960.0, 499.0, 20.0));
                assert_eq!(style.fill, Some(Color::WHITE));
            }
            other => panic!("expected box, got {other:?}"),
        }
        match &commands[2] {
            DrawCommand::Path { points, style, .. } => {
                assert_eq!(points[0].y, 970.0);
                assert_eq!(style.width, MEDIAN_WIDTH);
            }
            other => panic!("expected median, got {other:?}"),
        }
        match &commands[3] {
            DrawCommand::Group {
                children,
                transform,
            } => {
                assert_eq!(*transform, Transform2D::translate(250.0, 0.0));
                assert_eq!(children.len(), 1);
                assert_eq!(
                    children[0],
                    DrawCommand::filled_circle(
                        Point::new(0.0, 0.0),
                        OUTLIER_RADIUS,
                        Color::WHITE.with_alpha(OUTLIER_ALPHA)
                    )
                );
            }
            other => panic!("expected outlier group, got {other:?}"),
        }
    }

    #[test]
    fn test_no_outliers_no_group() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [5.0, 5.0, 5.0];
        let bins = compute_bins(&xs, &ys, 1, None).unwrap();
        let commands = paint(&bins, &ys, &mut NoJitter);
        assert_eq!(commands.len(), 3);
        assert!(!commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Group { .. })));
    }

    #[test]
    fn test_empty_bins_skipped() {
        let xs = [0.0, 0.1, 4.9, 5.0];
        let ys = [1.0, 2.0, 3.0, 4.0];
        let bins = compute_bins(&xs, &ys, 10, None).unwrap();
        assert!(bins.iter().any(|b| b.summary.is_none()));
        let painted = bins.iter().filter(|b| b.summary.is_some()).count();
        let commands = paint(&bins, &ys, &mut NoJitter);
        assert_eq!(commands.len(), painted * 3);
    }

    // =========================================================================
    // Jitter Tests
    // =========================================================================

    #[test]
    fn test_random_jitter_range_and_seed() {
        let mut a = RandomJitter::seeded(7);
        let mut b = RandomJitter::seeded(7);
        for _ in 0..1000 {
            let offset = a.next_offset();
            assert!((-2.0..2.0).contains(&offset));
            assert_eq!(offset, b.next_offset());
        }
    }

    #[test]
    fn test_entropy_jitter_in_range() {
        let mut jitter = RandomJitter::from_entropy();
        assert!((-2.0..2.0).contains(&jitter.next_offset()));
    }
}
