//! ProcessLauncher port - runs one wrapped execution
//!
//! The coverage collector hands a fully described process to this port and
//! waits for it to finish. Implementations must be shareable across
//! threads so independent contexts can run in parallel.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Everything needed to start one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

/// How a finished process ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitOutcome {
    pub success: bool,
    /// Human-readable status, e.g. `exit status: 1`
    pub status: String,
}

impl ExitOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            status: "exit status: 0".to_string(),
        }
    }

    pub fn failure(status: impl Into<String>) -> Self {
        Self {
            success: false,
            status: status.into(),
        }
    }
}

/// Abstract process launcher
///
/// Implementations:
/// - `SystemLauncher` - `std::process::Command`, inherits stdio
pub trait ProcessLauncher: Send + Sync {
    /// Start the process and block until it exits.
    fn launch(&self, request: &LaunchRequest) -> std::io::Result<ExitOutcome>;
}
