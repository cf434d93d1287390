//! services/api/src/web/submissions.rs
//!
//! The survey submission endpoint for signed-in respondents.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use tax_benchmark_core::SubmissionAnswers;

use crate::web::state::AppState;
use crate::web::{store_error_response, store_guard};

/// POST /submissions - Record the signed-in user's answers. A prior
/// submission by the same user is replaced and the new one starts pending.
pub async fn create_submission_handler(
    State(state): State<Arc<AppState>>,
    Json(answers): Json<SubmissionAnswers>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut store = store_guard(&state)?;
    let submission = store
        .create_submission(answers)
        .map_err(store_error_response)?;
    info!(id = %submission.id, user = %submission.user_name, "submission recorded");
    Ok((StatusCode::CREATED, Json(submission)))
}
