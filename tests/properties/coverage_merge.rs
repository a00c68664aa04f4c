//! Property tests for coverage merging.

use std::collections::BTreeSet;

use proptest::prelude::*;

use kiln::domain::entities::{ExecutionTrace, InstrumentedBinarySet, TraceRecord};
use kiln::domain::services::CoverageMerger;
use kiln::domain::value_objects::{ContentHash, ContextKind, ExclusionPatterns};

const BINARIES: &[&str] = &[
    "app/X.class",
    "app/Z.class",
    "app/support/Helper.class",
    "app/logger/Log.class",
];

fn binary_set() -> InstrumentedBinarySet {
    BINARIES.iter().fold(InstrumentedBinarySet::new(), |set, name| {
        set.with(*name, ContentHash::from_bytes(name.as_bytes()))
    })
}

/// Records may reference binaries outside the authoritative set
fn record() -> impl Strategy<Value = TraceRecord> {
    (
        prop::sample::select(vec![
            "app/X.class",
            "app/Z.class",
            "app/support/Helper.class",
            "app/logger/Log.class",
            "app/Y.class",
        ]),
        prop::collection::btree_set(0u32..50, 0..8),
    )
        .prop_map(|(binary, covered)| TraceRecord::new(binary, covered))
}

fn trace() -> impl Strategy<Value = ExecutionTrace> {
    (
        prop::sample::select(vec![ContextKind::UnitTests, ContextKind::Application]),
        prop::collection::vec(record(), 0..6),
    )
        .prop_map(|(kind, records)| {
            let mut trace = ExecutionTrace::new(kind, kind.as_str());
            trace.records = records;
            trace
        })
}

fn merger() -> CoverageMerger {
    CoverageMerger::new(ExclusionPatterns::new(["**/support/**", "**/logger/**"]).unwrap())
}

fn covered(merger: &CoverageMerger, traces: &[ExecutionTrace], binary: &str) -> BTreeSet<u32> {
    merger
        .merge(&binary_set(), traces)
        .model
        .covered(binary)
        .cloned()
        .unwrap_or_default()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Merge order does not affect the merged model.
    #[test]
    fn property_merge_is_commutative(t1 in trace(), t2 in trace(), t3 in trace()) {
        let merger = merger();
        let forward = merger.merge(&binary_set(), &[t1.clone(), t2.clone(), t3.clone()]);
        let backward = merger.merge(&binary_set(), &[t3, t1, t2]);
        prop_assert_eq!(forward.model, backward.model);
    }

    /// PROPERTY: Merging traces one batch at a time gives the same model.
    #[test]
    fn property_merge_is_associative(t1 in trace(), t2 in trace(), t3 in trace()) {
        let merger = merger();
        let all = merger.merge(&binary_set(), &[t1.clone(), t2.clone(), t3.clone()]);

        // (t1 ∪ t2) ∪ t3, carrying the partial model as a synthetic trace
        let partial = merger.merge(&binary_set(), &[t1, t2]);
        let mut carried = ExecutionTrace::new(ContextKind::UnitTests, "partial");
        for (name, coverage) in partial.model.iter() {
            carried = carried.with_record(TraceRecord::new(name.clone(), coverage.covered.iter().copied()));
        }
        let staged = merger.merge(&binary_set(), &[carried, t3]);

        prop_assert_eq!(all.model, staged.model);
    }

    /// PROPERTY: Adding a trace never removes a covered location.
    #[test]
    fn property_merge_is_monotonic(base in prop::collection::vec(trace(), 0..4), extra in trace()) {
        let merger = merger();
        let mut more = base.clone();
        more.push(extra);

        for name in BINARIES {
            let before = covered(&merger, &base, name);
            let after = covered(&merger, &more, name);
            prop_assert!(before.is_subset(&after), "{} lost coverage", name);
        }
    }

    /// PROPERTY: Excluded or unknown binaries never appear in the model.
    #[test]
    fn property_excluded_binaries_contribute_nothing(traces in prop::collection::vec(trace(), 0..4)) {
        let outcome = merger().merge(&binary_set(), &traces);

        prop_assert!(!outcome.model.contains("app/support/Helper.class"));
        prop_assert!(!outcome.model.contains("app/logger/Log.class"));
        prop_assert!(!outcome.model.contains("app/Y.class"));
        prop_assert_eq!(outcome.model.binary_count(), 2);
    }

    /// PROPERTY: A production binary's coverage is the union of every
    /// record for it.
    #[test]
    fn property_merge_is_union(traces in prop::collection::vec(trace(), 0..4)) {
        let expected: BTreeSet<u32> = traces
            .iter()
            .flat_map(|t| &t.records)
            .filter(|r| r.binary == "app/X.class")
            .flat_map(|r| r.covered.iter().copied())
            .collect();

        prop_assert_eq!(covered(&merger(), &traces, "app/X.class"), expected);
    }
}
