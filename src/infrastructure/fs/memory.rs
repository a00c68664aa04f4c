//! In-memory File System Implementation
//!
//! Implements the FileSystem port over a map of paths to bytes. Used to
//! exercise reconciliation without touching disk.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    failing_writes: BTreeSet<PathBuf>,
}

impl State {
    fn add_dir_with_parents(&mut self, dir: &Path) {
        for ancestor in dir.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

/// In-memory file system
#[derive(Debug, Default)]
pub struct MemoryFs {
    state: Mutex<State>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed a file (parent directories are created)
    pub fn with_file(self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Self {
        self.put(path.as_ref(), content.as_ref());
        self
    }

    /// Builder: seed an empty directory
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.lock().add_dir_with_parents(path.as_ref());
        self
    }

    /// Make every later write to `path` fail with an I/O error
    pub fn fail_writes_to(&self, path: impl AsRef<Path>) {
        self.lock().failing_writes.insert(path.as_ref().to_path_buf());
    }

    /// Insert or replace a file directly
    pub fn put(&self, path: &Path, content: &[u8]) {
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            state.add_dir_with_parents(parent);
        }
        state.files.insert(path.to_path_buf(), content.to_vec());
    }

    /// Current content of a file
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock().files.get(path.as_ref()).cloned()
    }

    /// Snapshot of all files directly inside `dir`, by name
    pub fn snapshot(&self, dir: impl AsRef<Path>) -> BTreeMap<String, Vec<u8>> {
        let dir = dir.as_ref();
        self.lock()
            .files
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .filter_map(|(path, content)| {
                let name = path.file_name()?.to_str()?.to_string();
                Some((name, content.clone()))
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking test thread must not hide the state from the others
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FileSystem for MemoryFs {
    fn list_files(&self, dir: &Path) -> FsResult<Vec<String>> {
        let state = self.lock();
        if state.files.contains_key(dir) {
            return Err(FsError::NotADirectory(dir.to_path_buf()));
        }
        if !state.dirs.contains(dir) {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }
        let names = state
            .files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
            .collect();
        Ok(names)
    }

    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        self.lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        if self.lock().failing_writes.contains(path) {
            return Err(FsError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other("injected write failure"),
            });
        }
        self.put(path, content);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.lock();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.lock().dirs.contains(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        self.lock()
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        let mut state = self.lock();
        if state.files.contains_key(path) {
            return Err(FsError::NotADirectory(path.to_path_buf()));
        }
        state.add_dir_with_parents(path);
        Ok(())
    }
}
