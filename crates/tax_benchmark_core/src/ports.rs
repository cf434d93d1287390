//! crates/tax_benchmark_core/src/ports.rs
//!
//! Defines the persistence contract (trait) for the store's core logic.
//! The trait forms the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete substrate (files, browser storage, memory).

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for blob-store operations.
/// This abstracts away the specific errors of the substrate (filesystem, etc.).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage failure: {0}")]
    Io(String),
}

/// A convenience type alias for `Result<T, StorageError>`.
pub type StorageResult<T> = Result<T, StorageError>;

//=========================================================================================
// Blob keys
//=========================================================================================

/// Logical names of the persisted blobs, one JSON document each.
pub mod keys {
    pub const SUBMISSIONS: &str = "submissions";
    pub const USERS: &str = "users";
    pub const SETTINGS: &str = "settings";
    pub const SESSION: &str = "session";
}

//=========================================================================================
// Persistence Port (Trait)
//=========================================================================================

/// Named-blob persistence: the store's only I/O boundary.
///
/// Operations are synchronous; the store issues a write immediately after
/// every mutation and is the sole writer of its blobs. Implementations do no
/// validation — callers own the serialization format and must tolerate
/// absent or corrupt values.
pub trait BlobStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value under a key, replacing any prior value.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
