use std::path::PathBuf;

use strata_types::Digest;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The path holds no control directory.
    #[error("not a strata repository: {0}")]
    NotARepository(PathBuf),

    /// `init` was called where a repository already exists.
    #[error("repository already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    /// The named commit is not in the store.
    #[error("unknown commit: {0}")]
    UnknownCommit(Digest),

    /// Object store failure (missing/corrupt objects are fatal to the
    /// enclosing operation).
    #[error(transparent)]
    Store(#[from] strata_store::StoreError),

    /// Head pointer failure.
    #[error(transparent)]
    Ref(#[from] strata_refs::RefError),

    /// Working tree failure.
    #[error(transparent)]
    Worktree(#[from] strata_worktree::WorktreeError),
}

/// Result alias for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;
