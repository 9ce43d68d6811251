use std::collections::HashMap;
use std::sync::RwLock;

use strata_types::Digest;

use crate::error::StoreResult;
use crate::record::ObjectRecord;
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. All records are held in memory behind
/// a `RwLock`; records are cloned on read.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<Digest, ObjectRecord>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Return a sorted list of all stored digests.
    pub fn all_digests(&self) -> Vec<Digest> {
        let map = self.objects.read().expect("lock poisoned");
        let mut digests: Vec<Digest> = map.keys().copied().collect();
        digests.sort();
        digests
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read(&self, digest: &Digest) -> StoreResult<Option<ObjectRecord>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.get(digest).cloned())
    }

    fn write(&self, digest: &Digest, record: &ObjectRecord) -> StoreResult<()> {
        let mut map = self.objects.write().expect("lock poisoned");
        // Idempotent: if already present, skip. Content-addressing
        // guarantees the same digest always maps to the same content.
        map.entry(*digest).or_insert_with(|| record.clone());
        Ok(())
    }

    fn exists(&self, digest: &Digest) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(digest))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Blob;

    fn blob_record(content: &[u8]) -> (Digest, ObjectRecord) {
        let blob = Blob::new(content.to_vec());
        (
            blob.digest(),
            ObjectRecord::Blob {
                content: blob.content,
            },
        )
    }

    #[test]
    fn write_and_read() {
        let store = InMemoryObjectStore::new();
        let (digest, record) = blob_record(b"hello world");
        store.write(&digest, &record).unwrap();

        let read_back = store.read(&digest).unwrap().expect("should exist");
        assert_eq!(read_back, record);
    }

    #[test]
    fn read_missing_returns_none() {
        let store = InMemoryObjectStore::new();
        assert!(store.read(&Digest::of_bytes(b"missing")).unwrap().is_none());
    }

    #[test]
    fn exists_tracks_presence() {
        let store = InMemoryObjectStore::new();
        let (digest, record) = blob_record(b"present");
        assert!(!store.exists(&digest).unwrap());
        store.write(&digest, &record).unwrap();
        assert!(store.exists(&digest).unwrap());
    }

    #[test]
    fn identical_content_stored_once() {
        let store = InMemoryObjectStore::new();
        let (d1, r1) = blob_record(b"identical");
        let (d2, r2) = blob_record(b"identical");
        assert_eq!(d1, d2);
        store.write(&d1, &r1).unwrap();
        store.write(&d2, &r2).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn write_is_idempotent() {
        let store = InMemoryObjectStore::new();
        let (digest, record) = blob_record(b"idempotent");
        store.write(&digest, &record).unwrap();
        store.write(&digest, &record).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn all_digests_is_sorted() {
        let store = InMemoryObjectStore::new();
        for content in [b"aaa".as_slice(), b"bbb", b"ccc"] {
            let (digest, record) = blob_record(content);
            store.write(&digest, &record).unwrap();
        }
        let digests = store.all_digests();
        assert_eq!(digests.len(), 3);
        for w in digests.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryObjectStore::new());
        let (digest, record) = blob_record(b"shared data");
        store.write(&digest, &record).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    assert!(store.read(&digest).unwrap().is_some());
                })
            })
            .collect();
        for h in handles {
            h.join().expect("thread should not panic");
        }
    }
}
