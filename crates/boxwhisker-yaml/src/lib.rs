//! YAML panel options for boxwhisker box-plot panels.

mod error;
mod options;

pub use error::ParseError;
pub use options::{
    BoxplotType, PanelOptions, SeriesCountSize, ThemeChoice, DEFAULT_THRESHOLD_NUM,
    THRESHOLD_NUM_RANGE,
};
