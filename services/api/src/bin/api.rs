//! services/api/src/bin/api.rs

use api_lib::{
    adapters::FileBlobs,
    config::Config,
    error::ApiError,
    web::{
        admin::{
            add_admin_email_handler, delete_all_submissions_handler, delete_submission_handler,
            export_handler, get_webhook_handler, import_handler, list_admin_emails_handler,
            list_submissions_handler, remove_admin_email_handler, set_webhook_handler,
            update_status_handler,
        },
        auth::{
            google_login_handler, login_handler, logout_handler, me_handler, register_handler,
            update_profile_handler,
        },
        report::report_handler,
        require_admin, require_auth,
        state::AppState,
        submissions::create_submission_handler,
    },
};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tax_benchmark_core::BenchmarkStore;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Store over the File Substrate ---
    info!("Opening benchmark store in {}", config.data_dir.display());
    let blobs = FileBlobs::new(config.data_dir.clone())
        .map_err(tax_benchmark_core::StoreError::from)?;
    let store = BenchmarkStore::open(Box::new(blobs))?;
    info!("Store ready.");

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(store));

    let cors = CorsLayer::new()
        .allow_origin("http://localhost:3000".parse::<HeaderValue>().map_err(|e| {
            ApiError::Internal(format!("invalid CORS origin: {e}"))
        })?)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 4. Create the Web Router ---
    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/google", post(google_login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/auth/me", get(me_handler));

    // Routes requiring an active session
    let user_routes = Router::new()
        .route("/profile", put(update_profile_handler))
        .route("/submissions", post(create_submission_handler))
        .route("/report", get(report_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    // Admin-only routes
    let admin_routes = Router::new()
        .route(
            "/admin/submissions",
            get(list_submissions_handler).delete(delete_all_submissions_handler),
        )
        .route("/admin/submissions/{id}/status", put(update_status_handler))
        .route("/admin/submissions/{id}", delete(delete_submission_handler))
        .route(
            "/admin/emails",
            get(list_admin_emails_handler).post(add_admin_email_handler),
        )
        .route("/admin/emails/{email}", delete(remove_admin_email_handler))
        .route(
            "/admin/webhook",
            get(get_webhook_handler).put(set_webhook_handler),
        )
        .route("/admin/export", get(export_handler))
        .route("/admin/import", post(import_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_admin,
        ));

    let app = Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(cors)
        .with_state(app_state);

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
