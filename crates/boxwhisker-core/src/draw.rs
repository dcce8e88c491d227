//! Draw commands consumed by an external renderer.
//!
//! All box-plot painting reduces to these primitives.

use crate::canvas::TextStyle;
use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for path rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

impl StrokeStyle {
    /// Solid stroke of the given color and width.
    #[must_use]
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Box style for rectangles and circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
        }
    }
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self { fill: Some(color) }
    }
}

/// 2D affine transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Matrix elements [a, b, c, d, e, f]
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    pub matrix: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Identity transformation.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Create a translation transform.
    #[must_use]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }
}

/// Drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a path (polyline or polygon)
    Path {
        /// Points defining the path
        points: Vec<Point>,
        /// Whether the path is closed
        closed: bool,
        /// Stroke style
        style: StrokeStyle,
    },

    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Box style
        style: BoxStyle,
    },

    /// Draw a circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Box style
        style: BoxStyle,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Position
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Group of commands with transform
    Group {
        /// Child commands
        children: Vec<DrawCommand>,
        /// Transform to apply
        transform: Transform2D,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a filled circle.
    #[must_use]
    pub fn filled_circle(center: Point, radius: f32, color: Color) -> Self {
        Self::Circle {
            center,
            radius,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a line between two points.
    #[must_use]
    pub fn line(from: Point, to: Point, style: StrokeStyle) -> Self {
        Self::Path {
            points: vec![from, to],
            closed: false,
            style,
        }
    }

    /// Number of leaf commands, descending into groups.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Group { children, .. } => children.iter().map(Self::leaf_count).sum(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_style_default() {
        let style = StrokeStyle::default();
        assert_eq!(style.color, Color::BLACK);
        assert_eq!(style.width, 1.0);
    }

    #[test]
    fn test_stroke_style_solid() {
        let style = StrokeStyle::solid(Color::WHITE, 2.0);
        assert_eq!(style.color, Color::WHITE);
        assert_eq!(style.width, 2.0);
    }

    #[test]
    fn test_box_style_fill() {
        assert_eq!(BoxStyle::fill(Color::BLACK).fill, Some(Color::BLACK));
        assert_eq!(BoxStyle::default().fill, Some(Color::WHITE));
    }

    #[test]
    fn test_transform_translate_matrix() {
        let t = Transform2D::translate(10.0, -5.0);
        assert_eq!(t.matrix, [1.0, 0.0, 0.0, 1.0, 10.0, -5.0]);
        assert_eq!(Transform2D::default(), Transform2D::identity());
    }

    #[test]
    fn test_line_helper() {
        let cmd = DrawCommand::line(Point::ORIGIN, Point::new(0.0, 5.0), StrokeStyle::default());
        match cmd {
            DrawCommand::Path { points, closed, .. } => {
                assert_eq!(points.len(), 2);
                assert!(!closed);
            }
            other => panic!("expected path, got {other:?}"),
        }
    }

    #[test]
    fn test_leaf_count_descends_groups() {
        let group = DrawCommand::Group {
            children: vec![
                DrawCommand::filled_circle(Point::ORIGIN, 2.0, Color::BLACK),
                DrawCommand::Group {
                    children: vec![DrawCommand::filled_rect(Rect::default(), Color::WHITE)],
                    transform: Transform2D::identity(),
                },
            ],
            transform: Transform2D::translate(3.0, 0.0),
        };
        assert_eq!(group.leaf_count(), 2);
    }

    #[test]
    fn test_draw_command_serializes() {
        let cmd = DrawCommand::filled_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        let json = serde_json::to_string(&cmd).unwrap();
        let back: DrawCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }
}
