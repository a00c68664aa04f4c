//! Asset entity - a packaged file
//!
//! Assets are the script files mirrored from the source directory into the
//! packaged resource directory. They are identified by their bare file name
//! and compared by content hash.

use crate::domain::value_objects::ContentHash;

/// A named asset in a flat directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Bare file name, e.g. `init.lua`
    name: String,
    /// Hash of the file content
    hash: ContentHash,
}

impl Asset {
    pub fn new(name: impl Into<String>, hash: ContentHash) -> Self {
        Self {
            name: name.into(),
            hash,
        }
    }

    /// Create an asset by hashing in-memory content
    pub fn from_content(name: impl Into<String>, content: &[u8]) -> Self {
        Self::new(name, ContentHash::from_bytes(content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    /// Check whether `other` has identical content
    pub fn same_content(&self, other: &Asset) -> bool {
        self.hash == other.hash
    }
}
