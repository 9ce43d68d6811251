use strata_types::Digest;

use crate::error::StoreResult;
use crate::record::ObjectRecord;

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written; the store never contains two
///   objects with the same digest but different content.
/// - `write` is idempotent and side-effect-free on repeat calls: an object
///   already present is never rewritten.
/// - The store is append-only for the lifetime of the repository.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Read the record stored under `digest`.
    ///
    /// Returns `Ok(None)` if no such object exists.
    fn read(&self, digest: &Digest) -> StoreResult<Option<ObjectRecord>>;

    /// Write `record` under `digest` if and only if no object with that
    /// digest already exists.
    fn write(&self, digest: &Digest, record: &ObjectRecord) -> StoreResult<()>;

    /// Check whether an object exists in the store.
    fn exists(&self, digest: &Digest) -> StoreResult<bool>;
}
