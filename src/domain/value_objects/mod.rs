//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod asset_filter;
mod exclusion_patterns;
mod execution_context;
mod hash;

pub use asset_filter::AssetFilter;
pub use exclusion_patterns::{ExclusionError, ExclusionPatterns};
pub use execution_context::{ContextKind, ExecutionContext, TRACE_EXTENSION};
pub use hash::ContentHash;
