//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Mutex;

use tax_benchmark_core::BenchmarkStore;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// The store keeps one authenticated identity at a time, process-wide.
/// Handlers take the mutex for the duration of one synchronous store call
/// and never hold it across an await point.
pub struct AppState {
    pub store: Mutex<BenchmarkStore>,
}

impl AppState {
    pub fn new(store: BenchmarkStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }
}
