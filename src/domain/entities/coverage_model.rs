//! Coverage entities
//!
//! - `InstrumentedBinarySet` - the authoritative binaries traces refer to
//! - `CoverageModel` - the merged, in-memory union of covered locations

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::value_objects::ContentHash;

use super::trace::TraceRecord;

/// The authoritative set of instrumented binaries, keyed by relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentedBinarySet {
    binaries: BTreeMap<String, ContentHash>,
}

impl InstrumentedBinarySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, id: ContentHash) {
        self.binaries.insert(name.into(), id);
    }

    /// Builder: add a binary
    pub fn with(mut self, name: impl Into<String>, id: ContentHash) -> Self {
        self.insert(name, id);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ContentHash> {
        self.binaries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ContentHash)> {
        self.binaries.iter()
    }

    pub fn len(&self) -> usize {
        self.binaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binaries.is_empty()
    }
}

/// Merged coverage of a single binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryCoverage {
    pub id: ContentHash,
    pub covered: BTreeSet<u32>,
}

impl BinaryCoverage {
    pub fn covered_count(&self) -> usize {
        self.covered.len()
    }
}

/// What happened to a trace record when it was offered to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Locations were unioned into the binary's coverage
    Merged,
    /// The binary is not part of the model
    Unknown,
    /// The record was taken against a different build of the binary
    Mismatched,
}

/// Union of covered locations per binary across all absorbed traces.
///
/// Absorbing is a set union per binary, so the result does not depend on
/// the order traces are absorbed in, and absorbing more traces never
/// removes a covered location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageModel {
    binaries: BTreeMap<String, BinaryCoverage>,
}

impl CoverageModel {
    /// Start a model covering `binaries`, each with no covered location.
    pub fn for_binaries(binaries: &InstrumentedBinarySet) -> Self {
        let binaries = binaries
            .iter()
            .map(|(name, id)| {
                (
                    name.clone(),
                    BinaryCoverage {
                        id: id.clone(),
                        covered: BTreeSet::new(),
                    },
                )
            })
            .collect();
        Self { binaries }
    }

    /// Union one trace record into the model.
    pub fn absorb(&mut self, record: &TraceRecord) -> RecordOutcome {
        let Some(entry) = self.binaries.get_mut(&record.binary) else {
            return RecordOutcome::Unknown;
        };
        if let Some(id) = &record.id {
            if *id != entry.id {
                return RecordOutcome::Mismatched;
            }
        }
        entry.covered.extend(record.covered.iter().copied());
        RecordOutcome::Merged
    }

    pub fn get(&self, binary: &str) -> Option<&BinaryCoverage> {
        self.binaries.get(binary)
    }

    /// Covered locations of a binary, if it is part of the model
    pub fn covered(&self, binary: &str) -> Option<&BTreeSet<u32>> {
        self.binaries.get(binary).map(|b| &b.covered)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BinaryCoverage)> {
        self.binaries.iter()
    }

    pub fn binary_count(&self) -> usize {
        self.binaries.len()
    }

    /// Total covered locations across all binaries
    pub fn covered_locations(&self) -> usize {
        self.binaries.values().map(BinaryCoverage::covered_count).sum()
    }

    pub fn contains(&self, binary: &str) -> bool {
        self.binaries.contains_key(binary)
    }
}
