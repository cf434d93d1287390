//! services/api/src/adapters/files.rs
//!
//! This module contains the file-backed persistence adapter, the concrete
//! implementation of the `BlobStore` port from the core crate. Each logical
//! blob lives in its own `<key>.json` file under the configured data
//! directory, durable across restarts.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tax_benchmark_core::{BlobStore, StorageError, StorageResult};

/// A blob store that keeps one JSON file per key.
#[derive(Clone)]
pub struct FileBlobs {
    dir: PathBuf,
}

impl FileBlobs {
    /// Creates a new `FileBlobs` rooted at `dir`, creating the directory if
    /// it does not exist yet.
    pub fn new(dir: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&dir).map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobs {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        fs::write(self.path_for(key), value).map_err(|e| StorageError::Io(e.to_string()))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}
