//! JSON coverage report
//!
//! Writes `coverage.json` into the report directory: per-binary covered
//! locations plus totals. Browsable renderings are left to other
//! `ReportRenderer` implementations.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::ports::report_renderer::{ReportRenderer, ReportRequest};
use crate::domain::ports::FsError;
use crate::domain::value_objects::ContentHash;
use crate::error::KilnResult;
use crate::infrastructure::fs::atomic_write;

/// File name of the rendered report
pub const REPORT_FILE_NAME: &str = "coverage.json";

#[derive(Serialize)]
struct JsonReport<'a> {
    report: &'a str,
    generated_at: DateTime<Utc>,
    traces: &'a [String],
    binaries: BTreeMap<&'a str, JsonBinary<'a>>,
    totals: JsonTotals,
}

#[derive(Serialize)]
struct JsonBinary<'a> {
    id: &'a ContentHash,
    covered: &'a BTreeSet<u32>,
    covered_count: usize,
}

#[derive(Serialize)]
struct JsonTotals {
    binaries: usize,
    covered_locations: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportRenderer;

impl JsonReportRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for JsonReportRenderer {
    fn render(&self, request: &ReportRequest<'_>, out_dir: &Path) -> KilnResult<PathBuf> {
        let binaries = request
            .model
            .iter()
            .map(|(name, coverage)| {
                (
                    name.as_str(),
                    JsonBinary {
                        id: &coverage.id,
                        covered: &coverage.covered,
                        covered_count: coverage.covered_count(),
                    },
                )
            })
            .collect();

        let report = JsonReport {
            report: request.name,
            generated_at: Utc::now(),
            traces: request.traces,
            binaries,
            totals: JsonTotals {
                binaries: request.model.binary_count(),
                covered_locations: request.model.covered_locations(),
            },
        };

        let content = serde_json::to_vec_pretty(&report)?;
        let path = out_dir.join(REPORT_FILE_NAME);
        atomic_write(&path, &content).map_err(|e| FsError::from_io(&path, e))?;
        Ok(path)
    }
}
