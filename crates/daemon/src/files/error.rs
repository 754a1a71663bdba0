//! Error types for file engine operations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during a file engine operation.
///
/// Every operation either completes or fails with exactly one of these
/// kinds. A failed call never leaves the engine unusable, though it may
/// leave the filesystem partially modified (recursive delete, batch upload).
#[derive(Debug, Error)]
pub enum EngineError {
    /// The supplied path escapes the root directory.
    #[error("path escapes the root directory: {0}")]
    InvalidPath(String),

    /// The target, or a parent it requires, does not exist.
    #[error("not found: {0}")]
    NotFound(PathBuf),

    /// The operating system refused access.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A conflicting entry already exists.
    #[error("already exists: {0}")]
    AlreadyExists(PathBuf),

    /// The archive is malformed or cannot be decoded.
    #[error("archive error: {path}: {source}")]
    Archive {
        /// Archive file path.
        path: PathBuf,
        /// Underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },

    /// Any other filesystem error, passed through with its native detail.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Classify an IO error against the path it occurred on.
///
/// Maps the OS error kinds that have a place in the engine's taxonomy to
/// their typed variants; everything else passes through as [`EngineError::Io`].
pub(crate) fn classify_io(path: &Path, err: io::Error) -> EngineError {
    match err.kind() {
        io::ErrorKind::NotFound => EngineError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => EngineError::PermissionDenied(path.to_path_buf()),
        io::ErrorKind::AlreadyExists => EngineError::AlreadyExists(path.to_path_buf()),
        _ => EngineError::Io(err),
    }
}
