//! Asset inclusion filter
//!
//! Selects which files of a flat directory are managed assets.

use std::fmt;

/// Extension-based inclusion filter, e.g. `*.lua`.
///
/// A file qualifies when its name ends in `.<extension>` and has a
/// non-empty stem. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFilter {
    extension: String,
}

impl AssetFilter {
    /// Create a filter for the given extension (leading dot optional).
    pub fn extension(ext: &str) -> Self {
        Self {
            extension: ext.trim_start_matches('.').to_string(),
        }
    }

    /// The extension without its leading dot
    pub fn ext(&self) -> &str {
        &self.extension
    }

    /// Check whether a bare file name is managed by this filter.
    pub fn matches(&self, name: &str) -> bool {
        match name.rsplit_once('.') {
            Some((stem, ext)) => !stem.is_empty() && ext == self.extension,
            None => false,
        }
    }
}

impl fmt::Display for AssetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*.{}", self.extension)
    }
}
