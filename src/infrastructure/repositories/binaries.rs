//! Instrumented binary catalog
//!
//! Walks the authoritative instrumented-binary directory and identifies
//! every binary by its relative path and content hash.

use std::fs;
use std::path::Path;

use crate::domain::entities::InstrumentedBinarySet;
use crate::domain::ports::FsError;
use crate::domain::value_objects::ContentHash;
use crate::error::{KilnError, KilnResult};

/// Loads the instrumented binary set from disk
#[derive(Debug, Clone, Default)]
pub struct BinaryCatalog {
    /// Only files with this extension count as binaries
    extension: Option<String>,
}

impl BinaryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: restrict binaries to one extension (leading dot optional)
    pub fn with_extension(mut self, extension: Option<&str>) -> Self {
        self.extension = extension.map(|e| e.trim_start_matches('.').to_string());
        self
    }

    /// Load every binary under `root`, recursively.
    ///
    /// Names are relative to `root` and always `/`-separated.
    pub fn load(&self, root: &Path) -> KilnResult<InstrumentedBinarySet> {
        if !root.is_dir() {
            return Err(KilnError::BinariesNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut set = InstrumentedBinarySet::new();
        self.load_recursive(root, root, &mut set)?;
        tracing::debug!(root = %root.display(), binaries = set.len(), "loaded instrumented binaries");
        Ok(set)
    }

    fn load_recursive(
        &self,
        root: &Path,
        current: &Path,
        set: &mut InstrumentedBinarySet,
    ) -> KilnResult<()> {
        let entries = fs::read_dir(current).map_err(|e| FsError::from_io(current, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| FsError::from_io(current, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| FsError::from_io(&path, e))?;

            if file_type.is_dir() {
                self.load_recursive(root, &path, set)?;
                continue;
            }
            // Linked directories are not followed; a link back up the tree never ends
            if file_type.is_symlink() && path.is_dir() {
                tracing::warn!(path = %path.display(), "skipping symlinked directory");
                continue;
            }
            if !self.accepts(&path) {
                continue;
            }

            let Some(name) = relative_name(root, &path) else {
                tracing::warn!(path = %path.display(), "skipping binary with non UTF-8 path");
                continue;
            };
            let bytes = fs::read(&path).map_err(|e| FsError::from_io(&path, e))?;
            set.insert(name, ContentHash::from_bytes(&bytes));
        }
        Ok(())
    }

    fn accepts(&self, path: &Path) -> bool {
        match &self.extension {
            Some(ext) => path.extension().and_then(|e| e.to_str()) == Some(ext.as_str()),
            None => true,
        }
    }
}

fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    Some(parts?.join("/"))
}
