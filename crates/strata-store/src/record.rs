//! The persisted, flat object form.
//!
//! An [`ObjectRecord`] is a single stored object with every nested
//! reference replaced by a digest. Records are the unit of storage: the
//! store reads and writes records, and the [`crate::persist`] module maps
//! between records and the live [`crate::node`] model.

use serde::{Deserialize, Serialize};
use strata_types::Digest;

use crate::error::{StoreError, StoreResult};

/// One stored object, serialized as opaque binary keyed by digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectRecord {
    /// Raw file content.
    Blob { content: Vec<u8> },
    /// A named file referencing its blob by digest.
    File { name: String, blob: Digest },
    /// A directory referencing its children by digest, in child order.
    Tree { name: String, children: Vec<Digest> },
    /// A tree digest plus optional parent commit digest.
    Commit {
        tree: Digest,
        parent: Option<Digest>,
    },
}

impl ObjectRecord {
    /// Human-readable kind tag, used in corruption diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ObjectRecord::Blob { .. } => "blob",
            ObjectRecord::File { .. } => "file",
            ObjectRecord::Tree { .. } => "tree",
            ObjectRecord::Commit { .. } => "commit",
        }
    }

    /// Serialize to the on-disk binary form.
    pub fn encode(&self) -> StoreResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Deserialize from the on-disk binary form.
    ///
    /// `digest` is the storage key the bytes were read under; it is only
    /// used to attribute decode failures.
    pub fn decode(digest: &Digest, bytes: &[u8]) -> StoreResult<Self> {
        bincode::deserialize(bytes).map_err(|e| StoreError::CorruptObject {
            digest: *digest,
            reason: e.to_string(),
        })
    }
}
