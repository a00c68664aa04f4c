//! Execution trace entity
//!
//! The record of which instrumented locations executed during one run.
//! Traces are immutable once written; aggregation only reads them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ContentHash, ContextKind};

/// Format tag written into every trace artifact
pub const TRACE_FORMAT: &str = "kiln-trace";

/// Current trace format version
pub const TRACE_VERSION: u32 = 1;

/// Which execution context produced a trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceOrigin {
    pub kind: ContextKind,
    pub name: String,
}

/// Coverage of one instrumented binary within a single trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Binary path relative to the instrumented-binary root, `/`-separated
    pub binary: String,
    /// Identity of the binary the trace was recorded against, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentHash>,
    /// Locations that executed at least once
    #[serde(default)]
    pub covered: BTreeSet<u32>,
}

impl TraceRecord {
    pub fn new(binary: impl Into<String>, covered: impl IntoIterator<Item = u32>) -> Self {
        Self {
            binary: binary.into(),
            id: None,
            covered: covered.into_iter().collect(),
        }
    }

    pub fn with_id(mut self, id: ContentHash) -> Self {
        self.id = Some(id);
        self
    }
}

/// A whole execution trace artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionTrace {
    pub format: String,
    pub version: u32,
    pub context: TraceOrigin,
    #[serde(default)]
    pub records: Vec<TraceRecord>,
}

impl ExecutionTrace {
    pub fn new(kind: ContextKind, name: impl Into<String>) -> Self {
        Self {
            format: TRACE_FORMAT.to_string(),
            version: TRACE_VERSION,
            context: TraceOrigin {
                kind,
                name: name.into(),
            },
            records: Vec::new(),
        }
    }

    /// Builder: append a record
    pub fn with_record(mut self, record: TraceRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Names of every binary this trace references
    pub fn touched_binaries(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.binary.clone()).collect()
    }
}
