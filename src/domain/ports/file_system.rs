//! FileSystem port - abstraction over file I/O operations
//!
//! The resource synchronizer and manifest generator only ever touch the
//! file system through this trait, so reconciliation can be exercised
//! against an in-memory implementation.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::value_objects::ContentHash;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    /// File or directory not found
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Permission denied
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Path exists but is not a directory
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Any other I/O error
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classify an `io::Error` raised while operating on `path`.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - real disk, atomic writes via temp file + rename
/// - `MemoryFs` - in-memory, for tests
pub trait FileSystem {
    /// List the names of the regular files directly inside `dir`.
    ///
    /// Subdirectories are not descended into and not reported.
    /// Returns `FsError::NotFound` if `dir` does not exist.
    fn list_files(&self, dir: &Path) -> FsResult<Vec<String>>;

    /// Read file content as bytes
    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Replace the file at `path` with `content`.
    ///
    /// Readers observe either the previous content or the new content,
    /// never a partial write.
    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if `path` is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Remove a file
    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Compute the content hash of a file
    fn hash(&self, path: &Path) -> FsResult<ContentHash> {
        self.read(path).map(|bytes| ContentHash::from_bytes(&bytes))
    }
}
