//! Manifest entity
//!
//! The manifest is a plain-text index of the assets in a packaged
//! directory: one bare name per line, sorted lexicographically, no trailing
//! newline or metadata. Consumers use it to enumerate packaged assets
//! without a compiled-in list.

use std::collections::BTreeSet;

/// Default manifest file name
pub const DEFAULT_MANIFEST_NAME: &str = ".manifest";

/// An ordered list of asset names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<String>,
}

impl Manifest {
    /// Build a manifest from asset names in any order.
    ///
    /// Names are sorted by byte order and deduplicated.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        Self {
            entries: sorted.into_iter().collect(),
        }
    }

    /// Parse manifest content the way the runtime consumer reads it.
    ///
    /// Lines are trimmed; blank lines and `#` comments are skipped. Order
    /// is preserved as written.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    /// Render the exact file content: names joined by `\n`.
    pub fn render(&self) -> String {
        self.entries.join("\n")
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e == name)
    }
}
