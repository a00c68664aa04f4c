//! Manifest Generator Use Case
//!
//! Rebuilds the manifest of a packaged directory from what is actually on
//! disk. The manifest is always written in full; it is never patched.

use std::path::{Path, PathBuf};

use crate::domain::entities::Manifest;
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::AssetFilter;
use crate::error::KilnResult;

/// Generates the manifest of one packaged directory
pub struct ManifestGenerator<'a, FS: FileSystem + ?Sized> {
    fs: &'a FS,
    filter: AssetFilter,
    manifest_name: String,
}

impl<'a, FS: FileSystem + ?Sized> ManifestGenerator<'a, FS> {
    pub fn new(fs: &'a FS, filter: AssetFilter, manifest_name: impl Into<String>) -> Self {
        Self {
            fs,
            filter,
            manifest_name: manifest_name.into(),
        }
    }

    pub fn manifest_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.manifest_name)
    }

    /// The manifest `dir` currently deserves, without writing anything.
    pub fn expected(&self, dir: &Path) -> KilnResult<Manifest> {
        let names = self.fs.list_files(dir)?;
        Ok(Manifest::from_names(names.into_iter().filter(|name| {
            if *name == self.manifest_name || !self.filter.matches(name) {
                return false;
            }
            // One entry per line; such a name would read back as two entries
            if name.contains(['\n', '\r']) {
                tracing::warn!(
                    name = %name.escape_debug(),
                    "skipping asset with a line break in its name"
                );
                return false;
            }
            true
        })))
    }

    /// Scan `dir` and replace its manifest file.
    pub fn generate(&self, dir: &Path) -> KilnResult<Manifest> {
        let manifest = self.expected(dir)?;
        let path = self.manifest_path(dir);
        self.fs.write(&path, manifest.render().as_bytes())?;
        tracing::info!(
            path = %path.display(),
            entries = manifest.len(),
            "manifest written"
        );
        Ok(manifest)
    }
}
