use thiserror::Error;

/// Errors from head pointer operations.
#[derive(Debug, Error)]
pub enum RefError {
    /// The head file exists but does not contain a valid digest.
    #[error("corrupt head: {0}")]
    CorruptHead(String),

    /// I/O error from the underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for head pointer operations.
pub type RefResult<T> = Result<T, RefError>;
