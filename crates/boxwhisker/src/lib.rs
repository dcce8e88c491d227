//! Binned box-plot panel painting.
//!
//! [`BoxPlotPanel`] turns host [`PanelData`] into draw commands on a
//! [`Canvas`](boxwhisker_core::Canvas): one [`BoxPlotLayer`] per series over
//! shared scales, a y axis, an x axis and a small text box.

pub mod axis;
mod error;
pub mod frame;
pub mod layer;
pub mod panel;

pub use axis::{format_date, format_number, Axis, AxisOrient, TickFormat};
pub use error::PanelError;
pub use frame::{DataFrame, Field, FieldType, FieldValues, PanelData};
pub use layer::{BoxPlotLayer, JitterSource, NoJitter, RandomJitter};
pub use panel::{BoxPlotPanel, Jitter, PanelGeometry, SeriesGeometry};
