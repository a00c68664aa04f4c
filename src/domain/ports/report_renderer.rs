//! ReportRenderer port - turns a merged coverage model into an artifact

use std::path::{Path, PathBuf};

use crate::domain::entities::CoverageModel;
use crate::error::KilnResult;

/// What a renderer is asked to render
#[derive(Debug, Clone, Copy)]
pub struct ReportRequest<'a> {
    /// Report name, e.g. `combined`
    pub name: &'a str,
    /// Names of the execution contexts whose traces were merged
    pub traces: &'a [String],
    pub model: &'a CoverageModel,
}

/// Abstract report renderer
///
/// Implementations:
/// - `JsonReportRenderer` - `coverage.json` summary
pub trait ReportRenderer {
    /// Render into `out_dir`, returning the path of the main artifact.
    fn render(&self, request: &ReportRequest<'_>, out_dir: &Path) -> KilnResult<PathBuf>;
}
