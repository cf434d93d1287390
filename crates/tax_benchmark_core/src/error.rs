//! crates/tax_benchmark_core/src/error.rs
//!
//! Defines the primary error type for store operations.

use crate::ports::StorageError;

/// The primary error type for the benchmark store.
///
/// Unknown-id status updates and deletes are deliberately *not* errors; the
/// store treats them as silent no-ops and callers re-read state if they need
/// confirmation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Registering with an email that already has an account.
    #[error("email already registered")]
    DuplicateAccount,

    /// Logging in with an email no account matches.
    #[error("account not found, please register first")]
    AccountNotFound,

    /// A requested password check failed.
    #[error("incorrect password")]
    IncorrectPassword,

    /// A submission operation was attempted without an active session.
    #[error("must be logged in")]
    NotAuthenticated,

    /// `import_database` was handed a document it could not parse. The store
    /// is left untouched.
    #[error("backup document could not be parsed: {0}")]
    MalformedBackup(String),

    /// The persistence substrate failed a read or write.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A failure inside the store itself (hashing, blob serialization).
    #[error("internal store error: {0}")]
    Internal(String),
}

/// A convenience type alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
