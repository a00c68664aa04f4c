//! Domain Entities
//!
//! - `Asset` - a packaged file, identified by name and content hash
//! - `Manifest` - the sorted index of packaged assets
//! - `ExecutionTrace` - covered locations recorded by one execution
//! - `CoverageModel` - union of traces over the instrumented binary set

mod asset;
mod coverage_model;
mod manifest;
mod trace;

pub use asset::Asset;
pub use coverage_model::{BinaryCoverage, CoverageModel, InstrumentedBinarySet, RecordOutcome};
pub use manifest::{Manifest, DEFAULT_MANIFEST_NAME};
pub use trace::{ExecutionTrace, TraceOrigin, TraceRecord, TRACE_FORMAT, TRACE_VERSION};
