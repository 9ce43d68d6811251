use strata_types::Digest;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A referenced digest has no corresponding stored object. Fatal to the
    /// enclosing operation: there is no partial-tree reconstruction.
    #[error("missing object: {0}")]
    MissingObject(Digest),

    /// The stored data decoded to an unexpected record kind.
    #[error("corrupt object {digest}: {reason}")]
    CorruptObject { digest: Digest, reason: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
