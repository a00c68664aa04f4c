//! Coverage merging service
//!
//! Folds any number of execution traces into one `CoverageModel` over the
//! authoritative binary set, after removing excluded binaries. The merge
//! is a union, so it is commutative and associative in the traces given.

use std::path::Path;

use crate::domain::entities::{
    CoverageModel, ExecutionTrace, InstrumentedBinarySet, RecordOutcome,
};
use crate::domain::value_objects::ExclusionPatterns;

/// Why a trace record did not contribute to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The binary matches an exclusion pattern
    Excluded,
    /// The binary is outside the authoritative set
    Unknown,
    /// The record was taken against a different build of the binary
    Mismatched,
}

/// A record dropped during merging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredRecord {
    /// Name of the execution context that produced the trace
    pub trace: String,
    pub binary: String,
    pub reason: IgnoreReason,
}

/// Bookkeeping for one merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub traces: usize,
    pub binaries_excluded: usize,
    pub records_merged: usize,
    pub ignored: Vec<IgnoredRecord>,
}

impl MergeStats {
    pub fn ignored_count(&self, reason: IgnoreReason) -> usize {
        self.ignored.iter().filter(|r| r.reason == reason).count()
    }
}

/// The merged model together with its bookkeeping
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub model: CoverageModel,
    pub stats: MergeStats,
}

/// Pure merging service
#[derive(Debug, Clone, Default)]
pub struct CoverageMerger {
    exclusions: ExclusionPatterns,
}

impl CoverageMerger {
    pub fn new(exclusions: ExclusionPatterns) -> Self {
        Self { exclusions }
    }

    pub fn exclusions(&self) -> &ExclusionPatterns {
        &self.exclusions
    }

    /// Restrict the binary set to production binaries.
    ///
    /// Returns the kept set and how many binaries were excluded.
    pub fn production_binaries(
        &self,
        binaries: &InstrumentedBinarySet,
    ) -> (InstrumentedBinarySet, usize) {
        let mut kept = InstrumentedBinarySet::new();
        let mut excluded = 0;
        for (name, id) in binaries.iter() {
            if self.exclusions.is_excluded(Path::new(name)) {
                excluded += 1;
            } else {
                kept.insert(name.clone(), id.clone());
            }
        }
        (kept, excluded)
    }

    /// Merge `traces` over `binaries`.
    pub fn merge(&self, binaries: &InstrumentedBinarySet, traces: &[ExecutionTrace]) -> MergeOutcome {
        let (production, binaries_excluded) = self.production_binaries(binaries);
        let mut model = CoverageModel::for_binaries(&production);
        let mut stats = MergeStats {
            binaries_excluded,
            ..MergeStats::default()
        };

        for trace in traces {
            stats.traces += 1;
            for record in &trace.records {
                // Record names come from outside; only catalog names are matched
                // against the exclusion patterns.
                let reason = match (
                    binaries.get(&record.binary),
                    production.get(&record.binary),
                ) {
                    (None, _) => IgnoreReason::Unknown,
                    (Some(_), None) => IgnoreReason::Excluded,
                    (Some(_), Some(_)) => match model.absorb(record) {
                        RecordOutcome::Merged => {
                            stats.records_merged += 1;
                            continue;
                        }
                        RecordOutcome::Unknown => IgnoreReason::Unknown,
                        RecordOutcome::Mismatched => IgnoreReason::Mismatched,
                    },
                };
                stats.ignored.push(IgnoredRecord {
                    trace: trace.context.name.clone(),
                    binary: record.binary.clone(),
                    reason,
                });
            }
        }

        MergeOutcome { model, stats }
    }
}
