//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod file_system;
pub mod process_launcher;
pub mod report_renderer;
pub mod trace_repository;

pub use file_system::{FileSystem, FsError, FsResult};
pub use process_launcher::{ExitOutcome, LaunchRequest, ProcessLauncher};
pub use report_renderer::{ReportRenderer, ReportRequest};
pub use trace_repository::{TraceError, TraceRepository};
