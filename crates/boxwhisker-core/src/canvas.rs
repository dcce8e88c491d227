//! Canvas abstraction and the retained-command canvas.

use crate::draw::{DrawCommand, StrokeStyle, Transform2D};
use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Canvas trait for paint operations.
///
/// Painters never touch a concrete backend; they describe shapes here and
/// the host decides how to rasterize them.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw text.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Push a transform applied to everything drawn until the matching pop.
    fn push_transform(&mut self, transform: Transform2D);

    /// Pop the transform.
    fn pop_transform(&mut self);
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
    /// Horizontal anchor relative to the position
    pub anchor: TextAnchor,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
            anchor: TextAnchor::Start,
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal (400)
    #[default]
    Normal,
    /// Bold (700)
    Bold,
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAnchor {
    /// Text starts at the position
    #[default]
    Start,
    /// Text is centered on the position
    Middle,
    /// Text ends at the position
    End,
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// Transforms become nested [`DrawCommand::Group`]s, so the recorded list is
/// a small scene graph a renderer can replay.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    transform_stack: Vec<(Transform2D, Vec<DrawCommand>)>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded top-level draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    ///
    /// Unbalanced transforms are closed first.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        while !self.transform_stack.is_empty() {
            self.pop_transform();
        }
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded top-level commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Get the number of recorded leaf commands, including those in groups.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.commands.iter().map(DrawCommand::leaf_count).sum()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Get the transform stack depth.
    #[must_use]
    pub fn transform_depth(&self) -> usize {
        self.transform_stack.len()
    }

    /// Add a raw draw command.
    pub fn add_command(&mut self, command: DrawCommand) {
        match self.transform_stack.last_mut() {
            Some((_, children)) => children.push(command),
            None => self.commands.push(command),
        }
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.add_command(DrawCommand::filled_rect(rect, color));
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.add_command(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.add_command(DrawCommand::line(from, to, StrokeStyle::solid(color, width)));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.add_command(DrawCommand::filled_circle(center, radius, color));
    }

    fn push_transform(&mut self, transform: Transform2D) {
        self.transform_stack.push((transform, Vec::new()));
    }

    fn pop_transform(&mut self) {
        if let Some((transform, children)) = self.transform_stack.pop() {
            self.add_command(DrawCommand::Group {
                children,
                transform,
            });
        }
    }
}
