use thiserror::Error;

/// Errors from foundation type parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The input was not valid hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The decoded value had the wrong length.
    #[error("invalid digest length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
