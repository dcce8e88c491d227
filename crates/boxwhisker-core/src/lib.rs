//! Core types for binned box plots.
//!
//! This crate provides the data-space half of a box-plot panel:
//! - Binning and summaries: [`BoxBinner`], [`BinBox`], [`BoxSummary`]
//! - Statistics: [`quantile`], [`extent`], [`ticks`], [`nice`]
//! - Scales: [`LinearScale`]
//! - Drawing primitives: [`Color`], [`Rect`], [`DrawCommand`], [`Canvas`]
//! - Themes and series colors: [`Theme`], [`ColorResolver`]

pub mod binning;
pub mod boxplot;
pub mod canvas;
mod color;
pub mod draw;
mod error;
mod geometry;
pub mod quantile;
pub mod scale;
pub mod theme;
pub mod ticks;

pub use binning::{BinLayout, Thresholds};
pub use boxplot::{compute_bins, BinBox, BoxBinner, BoxSummary, DEFAULT_WHISKER_FACTOR};
pub use canvas::{Canvas, FontWeight, RecordingCanvas, TextAnchor, TextStyle};
pub use color::{Color, ColorParseError};
pub use draw::{BoxStyle, DrawCommand, StrokeStyle, Transform2D};
pub use error::BinError;
pub use geometry::{Point, Rect};
pub use quantile::{extent, quantile, quantile_sorted};
pub use scale::LinearScale;
pub use theme::{
    classic_color, gradient_colors, ColorPalette, ColorResolver, Gradient, SeriesBy,
    SeriesColorMode, Theme, Typography,
};
pub use ticks::{nice, tick_increment, ticks, TickStep};
