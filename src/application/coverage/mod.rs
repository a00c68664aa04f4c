//! Coverage Module
//!
//! - `collector` - wraps execution contexts so each leaves one trace
//! - `aggregator` - merges traces over the instrumented binary set
//!
//! The two halves only share trace artifact paths.

mod aggregator;
mod collector;

pub use aggregator::{Aggregation, CoverageAggregator};
pub use collector::{CollectedTrace, CoverageCollector};
