pub mod admin;
pub mod auth;
pub mod middleware;
pub mod report;
pub mod state;
pub mod submissions;

use std::sync::{Arc, MutexGuard};

use axum::http::StatusCode;
use tax_benchmark_core::{BenchmarkStore, StoreError};

use crate::web::state::AppState;

// Re-export the middleware to make it easily accessible to the binary that
// will build the web server router.
pub use middleware::{require_admin, require_auth};

/// Lock the store for the duration of one handler call. The store itself is
/// single-writer and lock-free; this mutex is the service-boundary
/// serialization point.
pub(crate) fn store_guard(
    state: &Arc<AppState>,
) -> Result<MutexGuard<'_, BenchmarkStore>, (StatusCode, String)> {
    state.store.lock().map_err(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "store lock poisoned".to_string(),
        )
    })
}

/// Map store errors onto HTTP statuses.
pub(crate) fn store_error_response(err: StoreError) -> (StatusCode, String) {
    let status = match &err {
        StoreError::DuplicateAccount => StatusCode::CONFLICT,
        StoreError::AccountNotFound
        | StoreError::IncorrectPassword
        | StoreError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        StoreError::MalformedBackup(_) => StatusCode::BAD_REQUEST,
        StoreError::Storage(_) | StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}
