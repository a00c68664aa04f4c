//! Domain Services
//!
//! Pure logic over domain entities. No I/O.

mod coverage_merger;
mod planner;

pub use coverage_merger::{CoverageMerger, IgnoreReason, IgnoredRecord, MergeOutcome, MergeStats};
pub use planner::{FileAction, PlannedFile, Planner, SyncPlan};
