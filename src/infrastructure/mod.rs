//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, Memory)
//! - `process/` - Process launcher for wrapped executions
//! - `repositories/` - Trace artifacts and the instrumented binary catalog
//! - `report/` - Coverage report renderers

pub mod fs;
pub mod process;
pub mod report;
pub mod repositories;

pub use fs::{LocalFs, MemoryFs};
pub use process::SystemLauncher;
pub use report::JsonReportRenderer;
pub use repositories::{BinaryCatalog, JsonTraceRepository};
