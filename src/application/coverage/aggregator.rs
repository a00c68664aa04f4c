//! Coverage Aggregator Use Case
//!
//! Fan-in of any number of trace artifacts over the authoritative binary
//! set. Every artifact must load; a missing or corrupt one aborts the run
//! rather than being read as zero coverage.

use std::path::{Path, PathBuf};

use crate::config::CoverageConfig;
use crate::domain::entities::ExecutionTrace;
use crate::domain::ports::{ReportRenderer, ReportRequest, TraceRepository};
use crate::domain::services::{CoverageMerger, IgnoreReason, MergeOutcome};
use crate::error::{KilnError, KilnResult};
use crate::infrastructure::BinaryCatalog;

/// Merged coverage plus the names of the traces that went into it
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// Context names, in the order the artifacts were supplied
    pub traces: Vec<String>,
    pub outcome: MergeOutcome,
}

/// Coverage Aggregator
pub struct CoverageAggregator<R: TraceRepository> {
    traces: R,
    catalog: BinaryCatalog,
    merger: CoverageMerger,
    binaries: PathBuf,
}

impl<R: TraceRepository> CoverageAggregator<R> {
    /// Build from configuration; fails if an exclusion pattern is invalid.
    pub fn from_config(traces: R, config: &CoverageConfig) -> KilnResult<Self> {
        Ok(Self {
            traces,
            catalog: BinaryCatalog::new().with_extension(config.binary_extension.as_deref()),
            merger: CoverageMerger::new(config.exclusions()?),
            binaries: config.binaries.clone(),
        })
    }

    /// Load every artifact and the binary set, then merge.
    pub fn aggregate(&self, artifacts: &[PathBuf]) -> KilnResult<Aggregation> {
        if artifacts.is_empty() {
            return Err(KilnError::NoTraces);
        }

        let binaries = self.catalog.load(&self.binaries)?;
        let traces = artifacts
            .iter()
            .map(|path| {
                let trace = self.traces.load(path)?;
                tracing::debug!(
                    path = %path.display(),
                    context = %trace.context.name,
                    records = trace.records.len(),
                    "trace loaded"
                );
                Ok(trace)
            })
            .collect::<KilnResult<Vec<ExecutionTrace>>>()?;

        let outcome = self.merger.merge(&binaries, &traces);
        for ignored in &outcome.stats.ignored {
            match ignored.reason {
                // Expected for support code; not worth a warning
                IgnoreReason::Excluded => tracing::debug!(
                    trace = %ignored.trace,
                    binary = %ignored.binary,
                    "excluded binary ignored"
                ),
                IgnoreReason::Unknown => tracing::warn!(
                    trace = %ignored.trace,
                    binary = %ignored.binary,
                    "binary not in the instrumented set, ignored"
                ),
                IgnoreReason::Mismatched => tracing::warn!(
                    trace = %ignored.trace,
                    binary = %ignored.binary,
                    "trace recorded against a different build, ignored"
                ),
            }
        }
        tracing::info!(
            traces = outcome.stats.traces,
            binaries = outcome.model.binary_count(),
            excluded = outcome.stats.binaries_excluded,
            covered = outcome.model.covered_locations(),
            "coverage merged"
        );

        Ok(Aggregation {
            traces: traces.into_iter().map(|t| t.context.name).collect(),
            outcome,
        })
    }

    /// Hand the merged model to a renderer under `<report_dir>/<name>/`.
    pub fn report<RR: ReportRenderer + ?Sized>(
        &self,
        renderer: &RR,
        aggregation: &Aggregation,
        report_dir: &Path,
        name: &str,
    ) -> KilnResult<PathBuf> {
        let path = renderer.render(
            &ReportRequest {
                name,
                traces: &aggregation.traces,
                model: &aggregation.outcome.model,
            },
            &report_dir.join(name),
        )?;
        tracing::info!(report = name, path = %path.display(), "report written");
        Ok(path)
    }
}
