//! Repository implementations
//!
//! - `JsonTraceRepository` - execution trace artifacts
//! - `BinaryCatalog` - the authoritative instrumented-binary set

mod binaries;
mod trace;

pub use binaries::BinaryCatalog;
pub use trace::JsonTraceRepository;
