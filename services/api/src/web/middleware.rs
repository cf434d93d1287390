//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tax_benchmark_core::Role;

use crate::web::state::AppState;

/// Middleware that requires an active store session.
///
/// If no identity is signed in, returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let signed_in = {
        let store = state.store.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        store.current_user().is_some()
    };
    if !signed_in {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(req).await)
}

/// Middleware that requires the signed-in identity to hold the admin role.
///
/// A missing session and a non-admin role both return 401.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let is_admin = {
        let store = state.store.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        store
            .current_user()
            .map(|u| u.role == Role::Admin)
            .unwrap_or(false)
    };
    if !is_admin {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(req).await)
}
