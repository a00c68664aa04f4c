//! Report renderer implementations

mod json;

pub use json::{JsonReportRenderer, REPORT_FILE_NAME};
