//! JSON Trace Repository
//!
//! Implements the TraceRepository port. Trace artifacts are JSON documents
//! tagged with a format name and version so foreign or truncated files
//! are rejected instead of being read as empty coverage.

use std::path::Path;

use crate::domain::entities::{ExecutionTrace, TRACE_FORMAT, TRACE_VERSION};
use crate::domain::ports::trace_repository::{TraceError, TraceRepository};
use crate::infrastructure::fs::atomic_write;

/// JSON-based trace repository
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTraceRepository;

impl JsonTraceRepository {
    pub fn new() -> Self {
        Self
    }

    /// Decode and validate artifact bytes
    pub fn decode(path: &Path, bytes: &[u8]) -> Result<ExecutionTrace, TraceError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(TraceError::Corrupt {
                path: path.to_path_buf(),
                message: "artifact is empty".to_string(),
            });
        }

        let trace: ExecutionTrace =
            serde_json::from_slice(bytes).map_err(|e| TraceError::Corrupt {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if trace.format != TRACE_FORMAT {
            return Err(TraceError::Corrupt {
                path: path.to_path_buf(),
                message: format!("unexpected format '{}'", trace.format),
            });
        }
        if trace.version != TRACE_VERSION {
            return Err(TraceError::UnsupportedVersion {
                path: path.to_path_buf(),
                version: trace.version,
            });
        }
        Ok(trace)
    }
}

impl TraceRepository for JsonTraceRepository {
    fn load(&self, path: &Path) -> Result<ExecutionTrace, TraceError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TraceError::Missing(path.to_path_buf()),
            _ => TraceError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Self::decode(path, &bytes)
    }

    fn save(&self, trace: &ExecutionTrace, path: &Path) -> Result<(), TraceError> {
        let content = serde_json::to_vec_pretty(trace).map_err(|e| TraceError::Corrupt {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        atomic_write(path, &content).map_err(|e| TraceError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn clear(&self, path: &Path) -> Result<(), TraceError> {
        let io_err = |source: std::io::Error| TraceError::Io {
            path: path.to_path_buf(),
            source,
        };
        match std::fs::remove_file(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed stale trace"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(io_err(e)),
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        Ok(())
    }
}
