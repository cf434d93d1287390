//! services/api/src/web/auth.rs
//!
//! Authentication endpoints: register, login, Google sign-in, logout,
//! current-user, and profile update.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use tax_benchmark_core::User;

use crate::web::state::AppState;
use crate::web::{store_error_response, store_guard};

//=========================================================================================
// Request Types
//=========================================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload for the Google sign-in route. The email arrives already verified
/// by the identity provider integration upstream of this service; the store
/// never re-verifies it.
#[derive(Deserialize)]
pub struct GoogleLoginRequest {
    pub email: String,
    pub name: Option<String>,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/register - Create a new account and sign it in.
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut store = store_guard(&state)?;
    let user = store
        .register(&req.name, &req.email, &req.password)
        .map_err(store_error_response)?;
    info!(email = %user.email, "account registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/login - Sign in with email and password.
///
/// The public form always supplies a password; the password-less store path
/// is reserved for the Google route below.
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<User>, (StatusCode, String)> {
    let mut store = store_guard(&state)?;
    let user = store
        .login(&req.email, Some(&req.password))
        .map_err(store_error_response)?;
    Ok(Json(user))
}

/// POST /auth/google - Sign in with an externally verified identity.
pub async fn google_login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GoogleLoginRequest>,
) -> Result<Json<User>, (StatusCode, String)> {
    let mut store = store_guard(&state)?;
    let user = store
        .login_with_google(&req.email, req.name.as_deref())
        .map_err(store_error_response)?;
    Ok(Json(user))
}

/// POST /auth/logout - Clear the active session.
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = store_guard(&state)?;
    store.logout().map_err(store_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me - The signed-in identity, or null.
pub async fn me_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<User>>, (StatusCode, String)> {
    let store = store_guard(&state)?;
    Ok(Json(store.current_user().cloned()))
}

/// PUT /profile - Update the signed-in user's name and email.
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    Json(user): Json<User>,
) -> Result<Json<User>, (StatusCode, String)> {
    let mut store = store_guard(&state)?;
    let updated = store
        .update_user_profile(&user)
        .map_err(store_error_response)?;
    Ok(Json(updated))
}
