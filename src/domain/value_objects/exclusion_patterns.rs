//! Exclusion patterns value object
//!
//! Glob patterns identifying non-production code (support utilities,
//! logging scaffolding) to omit from coverage. Matching uses gitignore
//! semantics against binary paths relative to the instrumented-binary root.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use thiserror::Error;

/// Maximum number of patterns allowed
const MAX_PATTERNS: usize = 1000;

/// A compiled set of exclusion patterns.
#[derive(Debug, Clone)]
pub struct ExclusionPatterns {
    matcher: Gitignore,
    patterns: Vec<String>,
}

impl Default for ExclusionPatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl ExclusionPatterns {
    /// Create an empty pattern set (excludes nothing).
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            patterns: Vec::new(),
        }
    }

    /// Compile a list of glob patterns.
    ///
    /// Blank entries and entries starting with `#` are skipped.
    pub fn new<I, S>(patterns: I) -> Result<Self, ExclusionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new("");
        let mut kept = Vec::new();

        for pattern in patterns {
            let trimmed = pattern.as_ref().trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if kept.len() == MAX_PATTERNS {
                return Err(ExclusionError::TooManyPatterns {
                    limit: MAX_PATTERNS,
                });
            }

            builder
                .add_line(None, trimmed)
                .map_err(|e| ExclusionError::InvalidPattern {
                    pattern: trimmed.to_string(),
                    message: e.to_string(),
                })?;
            kept.push(trimmed.to_string());
        }

        let matcher = builder
            .build()
            .map_err(|e| ExclusionError::BuildFailed(e.to_string()))?;

        Ok(Self {
            matcher,
            patterns: kept,
        })
    }

    /// Check if a binary at `rel_path` is excluded.
    ///
    /// A binary is excluded when it or any of its parent directories match.
    /// Rooted paths are never relative to the binary root and never match.
    pub fn is_excluded(&self, rel_path: &Path) -> bool {
        if self.patterns.is_empty() || rel_path.has_root() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(rel_path, false)
            .is_ignore()
    }

    /// The patterns as configured (after skipping blanks and comments).
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Check if this is an empty pattern set.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Errors that can occur when compiling exclusion patterns.
#[derive(Debug, Error)]
pub enum ExclusionError {
    /// Too many patterns configured.
    #[error("exclusion list exceeds {limit} patterns")]
    TooManyPatterns { limit: usize },

    /// A pattern has invalid syntax.
    #[error("invalid exclusion pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Failed to build the matcher.
    #[error("failed to build exclusion matcher: {0}")]
    BuildFailed(String),
}
