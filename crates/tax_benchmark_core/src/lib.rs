pub mod backup;
pub mod domain;
pub mod error;
pub mod memory;
pub mod password;
pub mod ports;
pub mod store;

pub use backup::BackupDocument;
pub use domain::{Role, Settings, Submission, SubmissionAnswers, SubmissionStatus, User, UserRecord, Verdict};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryBlobs;
pub use ports::{keys, BlobStore, StorageError, StorageResult};
pub use store::BenchmarkStore;
