use std::path::PathBuf;

use thiserror::Error;

/// Errors from working tree operations.
#[derive(Debug, Error)]
pub enum WorktreeError {
    /// The snapshot root is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A path has an unexpected kind on disk (file where a directory is
    /// needed, or vice versa). During restore cleanup this is reported
    /// per-path and skipped rather than aborting.
    #[error("filesystem conflict at {path}: {reason}")]
    FilesystemConflict { path: PathBuf, reason: String },

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for working tree operations.
pub type WorktreeResult<T> = Result<T, WorktreeError>;
