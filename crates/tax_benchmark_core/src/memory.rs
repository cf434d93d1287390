//! crates/tax_benchmark_core/src/memory.rs
//!
//! An in-memory `BlobStore` implementation. Used by the test suite (every
//! test gets a fresh, empty store) and as an ephemeral substrate when no
//! durability is needed.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::ports::{BlobStore, StorageResult};

/// HashMap-backed blob store. Interior mutability keeps the `BlobStore`
/// contract `&self`-only, matching substrates with their own write paths.
#[derive(Default)]
pub struct MemoryBlobs {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a blob, e.g. to simulate state left by a previous run.
    pub fn with_blob(self, key: &str, value: &str) -> Self {
        self.blobs
            .lock()
            .expect("memory blob lock poisoned")
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl BlobStore for MemoryBlobs {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let blobs = self.blobs.lock().expect("memory blob lock poisoned");
        Ok(blobs.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut blobs = self.blobs.lock().expect("memory blob lock poisoned");
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut blobs = self.blobs.lock().expect("memory blob lock poisoned");
        blobs.remove(key);
        Ok(())
    }
}
