//! Domain Layer
//!
//! Pure logic for both pipelines, without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Asset, Manifest, ExecutionTrace, CoverageModel
//! - `value_objects/` - ContentHash, AssetFilter, ExclusionPatterns, ExecutionContext
//! - `services/` - Planner (sync reconciliation), CoverageMerger
//! - `ports/` - Interfaces implemented by the infrastructure layer

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
