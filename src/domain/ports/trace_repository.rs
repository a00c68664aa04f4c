//! TraceRepository port - reading and writing execution trace artifacts

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::ExecutionTrace;

/// Trace artifact errors
///
/// All of these are fatal for aggregation: a trace that cannot be read
/// must never be treated as an execution that covered nothing.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The artifact does not exist
    #[error("trace artifact not found: {}", .0.display())]
    Missing(PathBuf),

    /// The artifact exists but cannot be decoded
    #[error("corrupt trace artifact {}: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },

    /// The artifact was written by an incompatible producer
    #[error("trace artifact {} has unsupported version {version}", path.display())]
    UnsupportedVersion { path: PathBuf, version: u32 },

    /// Reading or writing failed
    #[error("I/O error on trace artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Abstract trace storage
pub trait TraceRepository {
    /// Load and validate one trace artifact
    fn load(&self, path: &Path) -> Result<ExecutionTrace, TraceError>;

    /// Write a trace artifact, replacing any previous one
    fn save(&self, trace: &ExecutionTrace, path: &Path) -> Result<(), TraceError>;

    /// Remove any artifact at `path` and make sure its directory exists,
    /// so the next execution starts from a clean slate.
    fn clear(&self, path: &Path) -> Result<(), TraceError>;
}
