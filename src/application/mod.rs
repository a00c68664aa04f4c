//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ResourceSync` - Reconciles the packaged directory, then regenerates its manifest
//! - `ManifestGenerator` - Rewrites a manifest from the directory contents
//! - `CheckUseCase` - Reports drift without writing
//! - `CoverageCollector` - Runs execution contexts under instrumentation
//! - `CoverageAggregator` - Merges trace artifacts and renders a report

pub mod check;
pub mod coverage;
pub mod manifest;
pub mod sync;

pub use check::{CheckItem, CheckResult, CheckStatus, CheckUseCase};
pub use coverage::{Aggregation, CollectedTrace, CoverageAggregator, CoverageCollector};
pub use manifest::ManifestGenerator;
pub use sync::{ResourceSync, SyncOptions, SyncResult};
