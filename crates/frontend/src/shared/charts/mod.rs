//! Hand-drawn SVG charts. Geometry is computed by plain functions so it can
//! be tested without a browser; the components only emit SVG elements.

pub mod bar_chart;
pub mod line_chart;
pub mod scale;

pub use bar_chart::{BarChart, BarGroup};
pub use line_chart::{LineChart, LineSeriesPoint};

pub const TEST_COLOR: &str = "#2563eb";
pub const CONTROL_COLOR: &str = "#94a3b8";
