//! Error types for Kiln
//!
//! Library errors use `thiserror`; the CLI wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ports::{FsError, TraceError};
use crate::domain::value_objects::ExclusionError;

/// Result type alias for Kiln operations
pub type KilnResult<T> = Result<T, KilnError>;

/// Main error type for Kiln operations
#[derive(Error, Debug)]
pub enum KilnError {
    /// File system failure during sync, manifest generation or report writing
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Configuration could not be loaded or failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An exclusion pattern did not compile
    #[error(transparent)]
    Exclusion(#[from] ExclusionError),

    /// A trace artifact is missing or corrupt
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// The source directory of a sync does not exist
    #[error("source directory not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// The authoritative instrumented-binary directory does not exist
    #[error("instrumented binary directory not found: {}", path.display())]
    BinariesNotFound { path: PathBuf },

    /// Aggregation was requested without any trace artifact
    #[error("no execution traces supplied for aggregation")]
    NoTraces,

    /// A wrapped execution could not be launched
    #[error("failed to launch '{context}': {source}")]
    Launch {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// A wrapped execution exited unsuccessfully
    #[error("execution '{context}' failed with {status}")]
    ExecutionFailed { context: String, status: String },

    /// A wrapped execution finished without producing its trace artifact
    #[error("execution '{context}' produced no trace at {}", path.display())]
    TraceNotProduced { context: String, path: PathBuf },

    /// No configured execution context has the requested name
    #[error("unknown execution context '{name}'")]
    UnknownContext { name: String },

    /// Report serialization failure
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}
