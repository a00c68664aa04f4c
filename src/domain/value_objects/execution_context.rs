//! Execution context value object
//!
//! One distinct run (test suite or live application) whose coverage is
//! recorded into its own trace artifact.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File extension of trace artifacts
pub const TRACE_EXTENSION: &str = "trace";

/// The kind of an execution context, as recorded in trace artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextKind {
    /// An isolated test-suite run
    UnitTests,
    /// A full application run
    Application,
}

impl ContextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKind::UnitTests => "unit-tests",
            ContextKind::Application => "application",
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wrapped execution.
///
/// Each context owns exactly one trace artifact at
/// `<trace_dir>/<name>.trace`; names are unique within a configuration so
/// artifacts never collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ExecutionContext {
    /// Run a test suite against the instrumented library
    UnitTests {
        name: String,
        command: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        working_dir: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        env: BTreeMap<String, String>,
    },
    /// Run the application; it discovers its runtime assets relative to
    /// `working_dir`, so the directory is mandatory.
    Application {
        name: String,
        command: Vec<String>,
        working_dir: PathBuf,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        env: BTreeMap<String, String>,
    },
}

impl ExecutionContext {
    pub fn name(&self) -> &str {
        match self {
            ExecutionContext::UnitTests { name, .. } => name,
            ExecutionContext::Application { name, .. } => name,
        }
    }

    pub fn kind(&self) -> ContextKind {
        match self {
            ExecutionContext::UnitTests { .. } => ContextKind::UnitTests,
            ExecutionContext::Application { .. } => ContextKind::Application,
        }
    }

    /// Program and arguments
    pub fn command(&self) -> &[String] {
        match self {
            ExecutionContext::UnitTests { command, .. } => command,
            ExecutionContext::Application { command, .. } => command,
        }
    }

    /// Working directory the process is launched in, if any
    pub fn working_dir(&self) -> Option<&Path> {
        match self {
            ExecutionContext::UnitTests { working_dir, .. } => working_dir.as_deref(),
            ExecutionContext::Application { working_dir, .. } => Some(working_dir),
        }
    }

    /// Extra environment for the process
    pub fn env(&self) -> &BTreeMap<String, String> {
        match self {
            ExecutionContext::UnitTests { env, .. } => env,
            ExecutionContext::Application { env, .. } => env,
        }
    }

    /// Where this context's trace artifact lives
    pub fn trace_path(&self, trace_dir: &Path) -> PathBuf {
        trace_dir.join(format!("{}.{}", self.name(), TRACE_EXTENSION))
    }

    /// Resolve relative working directories against `base`.
    pub fn resolved(mut self, base: &Path) -> Self {
        match &mut self {
            ExecutionContext::UnitTests {
                working_dir: Some(dir),
                ..
            }
            | ExecutionContext::Application {
                working_dir: dir, ..
            } => {
                if dir.is_relative() {
                    *dir = base.join(&*dir);
                }
            }
            ExecutionContext::UnitTests {
                working_dir: None, ..
            } => {}
        }
        self
    }
}
