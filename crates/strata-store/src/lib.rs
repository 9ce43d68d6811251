//! Content-addressed object storage for Strata.
//!
//! This crate implements the object model and a hash-keyed object store
//! analogous to git's `.git/objects/` directory. Every piece of versioned
//! data — blobs, file entries, trees, commits — is identified by its digest
//! and stored at most once.
//!
//! # Two representations
//!
//! - The **live model** ([`Node`], [`Blob`], [`FileEntry`], [`Tree`],
//!   [`Commit`]) is an owned in-memory tree used during snapshot
//!   construction and diffing. Digests are derived values, recomputed from
//!   current contents on every access so they can never go stale after a
//!   mutation.
//! - The **persisted form** ([`ObjectRecord`]) is flat: every nested object
//!   is replaced by its digest. The [`persist`] module converts between the
//!   two, writing depth-first and resolving recursively on load.
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Writes are idempotent: an object already present is never rewritten.
//! 3. The store never interprets object contents beyond decoding records.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod node;
pub mod persist;
pub mod record;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;
pub use node::{Blob, Commit, FileEntry, Node, Tree};
pub use persist::{load_commit, load_node, persist_commit, persist_node};
pub use record::ObjectRecord;
pub use traits::ObjectStore;
