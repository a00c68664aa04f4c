//! Configuration type definitions

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::DEFAULT_MANIFEST_NAME;
use crate::domain::value_objects::{
    AssetFilter, ExclusionError, ExclusionPatterns, ExecutionContext,
};

use super::loader::ConfigError;

/// Resource synchronization configuration (`[resources]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Source-of-truth asset directory
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Packaged resource directory managed by the synchronizer
    #[serde(default = "default_destination")]
    pub destination: PathBuf,

    /// Extension of managed assets
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Manifest file name, written at the root of `destination`
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            destination: default_destination(),
            extension: default_extension(),
            manifest: default_manifest(),
        }
    }
}

impl ResourcesConfig {
    pub fn filter(&self) -> AssetFilter {
        AssetFilter::extension(&self.extension)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.destination.join(&self.manifest)
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("assets")
}

fn default_destination() -> PathBuf {
    PathBuf::from("resources/assets")
}

fn default_extension() -> String {
    "lua".to_string()
}

fn default_manifest() -> String {
    DEFAULT_MANIFEST_NAME.to_string()
}

/// Coverage configuration (`[coverage]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// Authoritative instrumented-binary directory
    #[serde(default = "default_binaries")]
    pub binaries: PathBuf,

    /// Only files with this extension are binaries
    #[serde(default)]
    pub binary_extension: Option<String>,

    /// Glob patterns of non-production binaries
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Where trace artifacts are written, one per context
    #[serde(default = "default_trace_dir")]
    pub trace_dir: PathBuf,

    /// Environment variable carrying the trace destination to the agent
    #[serde(default = "default_trace_env")]
    pub trace_env: String,

    /// Reports land in `<report_dir>/<report name>/`
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    #[serde(default)]
    pub contexts: Vec<ExecutionContext>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            binaries: default_binaries(),
            binary_extension: None,
            exclude: Vec::new(),
            trace_dir: default_trace_dir(),
            trace_env: default_trace_env(),
            report_dir: default_report_dir(),
            contexts: Vec::new(),
        }
    }
}

impl CoverageConfig {
    pub fn exclusions(&self) -> Result<ExclusionPatterns, ExclusionError> {
        ExclusionPatterns::new(&self.exclude)
    }

    pub fn context(&self, name: &str) -> Option<&ExecutionContext> {
        self.contexts.iter().find(|c| c.name() == name)
    }
}

fn default_binaries() -> PathBuf {
    PathBuf::from("target/instrumented")
}

fn default_trace_dir() -> PathBuf {
    PathBuf::from("target/coverage")
}

fn default_trace_env() -> String {
    "KILN_TRACE_FILE".to_string()
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("coverage")
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resources: ResourcesConfig,

    #[serde(default)]
    pub coverage: CoverageConfig,
}

impl Config {
    /// Make every relative path absolute against `base`.
    pub fn resolved(mut self, base: &Path) -> Self {
        let join = |p: &PathBuf| if p.is_relative() { base.join(p) } else { p.clone() };

        self.resources.source = join(&self.resources.source);
        self.resources.destination = join(&self.resources.destination);
        self.coverage.binaries = join(&self.coverage.binaries);
        self.coverage.trace_dir = join(&self.coverage.trace_dir);
        self.coverage.report_dir = join(&self.coverage.report_dir);
        self.coverage.contexts = self
            .coverage
            .contexts
            .into_iter()
            .map(|c| c.resolved(base))
            .collect();
        self
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::Invalid { message });

        if self.resources.extension.trim_start_matches('.').is_empty() {
            return invalid("resources.extension must not be empty".to_string());
        }
        if !is_single_segment(&self.resources.manifest) {
            return invalid(format!(
                "resources.manifest must be a plain file name, got '{}'",
                self.resources.manifest
            ));
        }
        if self.coverage.trace_env.is_empty() {
            return invalid("coverage.trace_env must not be empty".to_string());
        }

        let mut seen = BTreeSet::new();
        for ctx in &self.coverage.contexts {
            if !is_single_segment(ctx.name()) {
                return invalid(format!(
                    "context name '{}' must be a plain file name",
                    ctx.name()
                ));
            }
            if !seen.insert(ctx.name()) {
                return invalid(format!(
                    "duplicate context name '{}': trace artifacts would collide",
                    ctx.name()
                ));
            }
            if ctx.command().is_empty() {
                return invalid(format!("context '{}' has an empty command", ctx.name()));
            }
        }
        Ok(())
    }
}

fn is_single_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
