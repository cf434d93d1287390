//! services/api/src/web/admin.rs
//!
//! Admin endpoints: submission moderation, the admin allow-list, the webhook
//! URL, and full-database export/import. All routes here sit behind the
//! `require_admin` middleware.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use tax_benchmark_core::{Submission, Verdict};

use crate::web::state::AppState;
use crate::web::{store_error_response, store_guard};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize)]
pub struct VerdictRequest {
    pub status: Verdict,
}

#[derive(Deserialize)]
pub struct AdminEmailRequest {
    pub email: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub webhook_url: String,
}

//=========================================================================================
// Submission moderation
//=========================================================================================

/// GET /admin/submissions - Every submission, any status, insertion order.
pub async fn list_submissions_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Submission>>, (StatusCode, String)> {
    let store = store_guard(&state)?;
    Ok(Json(store.submissions()))
}

/// PUT /admin/submissions/{id}/status - Approve or reject. Unknown ids are a
/// no-op, mirroring the store contract.
pub async fn update_status_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<VerdictRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = store_guard(&state)?;
    store
        .update_submission_status(&id, req.status)
        .map_err(store_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /admin/submissions/{id} - Remove one submission.
pub async fn delete_submission_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = store_guard(&state)?;
    store.delete_submission(&id).map_err(store_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /admin/submissions - Remove every submission.
pub async fn delete_all_submissions_handler(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = store_guard(&state)?;
    store
        .delete_all_submissions()
        .map_err(store_error_response)?;
    info!("all submissions deleted");
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Admin allow-list and webhook settings
//=========================================================================================

/// GET /admin/emails - The admin allow-list.
pub async fn list_admin_emails_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let store = store_guard(&state)?;
    Ok(Json(store.admin_emails().to_vec()))
}

/// POST /admin/emails - Authorize an email; promotes any existing account
/// immediately.
pub async fn add_admin_email_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdminEmailRequest>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let mut store = store_guard(&state)?;
    store
        .add_admin_email(&req.email)
        .map_err(store_error_response)?;
    Ok(Json(store.admin_emails().to_vec()))
}

/// DELETE /admin/emails/{email} - Revoke an email; demotes any existing
/// account immediately.
pub async fn remove_admin_email_handler(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let mut store = store_guard(&state)?;
    store
        .remove_admin_email(&email)
        .map_err(store_error_response)?;
    Ok(Json(store.admin_emails().to_vec()))
}

/// GET /admin/webhook - The configured sheet-sync webhook URL.
pub async fn get_webhook_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WebhookPayload>, (StatusCode, String)> {
    let store = store_guard(&state)?;
    Ok(Json(WebhookPayload {
        webhook_url: store.webhook_url().to_string(),
    }))
}

/// PUT /admin/webhook - Overwrite the webhook URL. The network push itself
/// is the client's job; the service only stores the endpoint.
pub async fn set_webhook_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WebhookPayload>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = store_guard(&state)?;
    store
        .set_webhook_url(&req.webhook_url)
        .map_err(store_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Backup
//=========================================================================================

/// GET /admin/export - The full-fidelity database dump, served as a file
/// download.
pub async fn export_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let store = store_guard(&state)?;
    let dump = store.export_database().map_err(store_error_response)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"benchmark_full_db.json\"".to_string(),
            ),
        ],
        dump,
    ))
}

/// POST /admin/import - Total restore from a previously exported document.
/// An unparsable body is a 400 with no state change.
pub async fn import_handler(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = store_guard(&state)?;
    store.import_database(&body).map_err(store_error_response)?;
    info!("database restored from backup document");
    Ok(StatusCode::NO_CONTENT)
}
