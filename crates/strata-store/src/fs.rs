use std::io::Write;
use std::path::{Path, PathBuf};

use strata_types::Digest;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::record::ObjectRecord;
use crate::traits::ObjectStore;

/// Filesystem-backed object store: one file per object, named by digest.
///
/// The data directory holds the serialized form of every object, with the
/// lowercase hex digest as the filename. There is no index or manifest;
/// existence checks are filesystem-presence checks. Writes go to a
/// temporary file in the same directory and are published by rename, so a
/// reader never observes a half-written object.
pub struct FsObjectStore {
    data_dir: PathBuf,
}

impl FsObjectStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// The directory holding the object files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn object_path(&self, digest: &Digest) -> PathBuf {
        self.data_dir.join(digest.to_hex())
    }
}

impl ObjectStore for FsObjectStore {
    fn read(&self, digest: &Digest) -> StoreResult<Option<ObjectRecord>> {
        let path = self.object_path(digest);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        ObjectRecord::decode(digest, &bytes).map(Some)
    }

    fn write(&self, digest: &Digest, record: &ObjectRecord) -> StoreResult<()> {
        let path = self.object_path(digest);
        if path.exists() {
            // Already persisted by an earlier commit; never rewritten.
            debug!(digest = %digest.short_hex(), kind = record.kind(), "object present, skipping");
            return Ok(());
        }
        let bytes = record.encode()?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.data_dir)?;
        tmp.write_all(&bytes)?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        debug!(digest = %digest.short_hex(), kind = record.kind(), bytes = bytes.len(), "object written");
        Ok(())
    }

    fn exists(&self, digest: &Digest) -> StoreResult<bool> {
        Ok(self.object_path(digest).exists())
    }
}

impl std::fmt::Debug for FsObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsObjectStore")
            .field("data_dir", &self.data_dir)
            .finish()
    }
}
