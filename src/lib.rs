//! Kiln - resource packaging and cross-execution coverage tool
//!
//! Kiln keeps a packaged resource directory in sync with its source of
//! truth and publishes a manifest of what was packaged. It also runs
//! independent executions under instrumentation and merges their traces
//! into one coverage report.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    CheckUseCase, CoverageAggregator, CoverageCollector, ManifestGenerator, ResourceSync,
    SyncOptions,
};
pub use config::Config;
pub use error::{KilnError, KilnResult};
