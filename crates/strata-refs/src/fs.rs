use std::io::Write;
use std::path::{Path, PathBuf};

use strata_types::Digest;

use crate::error::{RefError, RefResult};
use crate::traits::HeadStore;

/// Head pointer stored as plain-text hex in a single file.
///
/// A missing file reads as "no commits yet". Writes go through a temporary
/// file in the same directory and are published by rename, so the head is
/// never observed half-written.
pub struct FsHeadStore {
    path: PathBuf,
}

impl FsHeadStore {
    /// Create a head store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The head file location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HeadStore for FsHeadStore {
    fn read(&self) -> RefResult<Option<Digest>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RefError::Io(e)),
        };
        let digest = Digest::from_hex(text.trim())
            .map_err(|e| RefError::CorruptHead(e.to_string()))?;
        Ok(Some(digest))
    }

    fn write(&self, digest: &Digest) -> RefResult<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(digest.to_hex().as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| RefError::Io(e.error))?;
        Ok(())
    }
}

impl std::fmt::Debug for FsHeadStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsHeadStore")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_head_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsHeadStore::new(dir.path().join("HEAD"));
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsHeadStore::new(dir.path().join("HEAD"));
        let digest = Digest::of_bytes(b"commit");

        store.write(&digest).unwrap();
        assert_eq!(store.read().unwrap(), Some(digest));
    }

    #[test]
    fn head_file_is_plain_hex() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("HEAD");
        let store = FsHeadStore::new(&path);
        let digest = Digest::of_bytes(b"commit");

        store.write(&digest).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, digest.to_hex());
    }

    #[test]
    fn second_write_moves_the_head() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsHeadStore::new(dir.path().join("HEAD"));
        let first = Digest::of_bytes(b"first");
        let second = Digest::of_bytes(b"second");

        store.write(&first).unwrap();
        store.write(&second).unwrap();
        assert_eq!(store.read().unwrap(), Some(second));
    }

    #[test]
    fn trailing_newline_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("HEAD");
        let digest = Digest::of_bytes(b"commit");
        std::fs::write(&path, format!("{}\n", digest.to_hex())).unwrap();

        let store = FsHeadStore::new(&path);
        assert_eq!(store.read().unwrap(), Some(digest));
    }

    #[test]
    fn garbage_head_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("HEAD");
        std::fs::write(&path, "not a digest").unwrap();

        let store = FsHeadStore::new(&path);
        assert!(matches!(store.read(), Err(RefError::CorruptHead(_))));
    }
}
