use std::sync::RwLock;

use strata_types::Digest;

use crate::error::RefResult;
use crate::traits::HeadStore;

/// In-memory head pointer for tests and embedding.
#[derive(Default)]
pub struct InMemoryHeadStore {
    head: RwLock<Option<Digest>>,
}

impl InMemoryHeadStore {
    /// Create a store with no head set.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HeadStore for InMemoryHeadStore {
    fn read(&self) -> RefResult<Option<Digest>> {
        Ok(*self.head.read().expect("lock poisoned"))
    }

    fn write(&self, digest: &Digest) -> RefResult<()> {
        *self.head.write().expect("lock poisoned") = Some(*digest);
        Ok(())
    }
}
