use strata_types::Digest;

use crate::error::RefResult;

/// Storage for the head pointer.
///
/// The head is the digest of the most recent commit. Implementations must
/// report an absent head as `Ok(None)` — a repository with no commits is a
/// normal state, not a failure.
pub trait HeadStore: Send + Sync {
    /// Read the current head digest, if any.
    fn read(&self) -> RefResult<Option<Digest>>;

    /// Advance (or move) the head to `digest`.
    fn write(&self, digest: &Digest) -> RefResult<()>;
}
