pub mod chart;
pub mod config;
pub mod country;
pub mod dashboard;
pub mod detail;
pub mod dimension;
pub mod error;
pub mod selection;
pub mod workbook;

pub use dashboard::{render, DashboardView, Snapshot};
pub use dimension::Dimension;
pub use error::PipelineError;
pub use selection::Selection;
pub use workbook::Workbook;
