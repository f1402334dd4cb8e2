pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;
use crate::web;

/// Uploads larger than this are rejected before parsing.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Page
        .route("/", get(web::handle_start))
        .route("/sessions/:id", get(web::handle_page))
        .route("/sessions/:id/generate", post(web::handle_generate))
        .route(
            "/sessions/:id/history/:index/download",
            get(web::handle_download),
        )
        // JSON API
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route("/api/v1/sessions/:id", delete(handlers::handle_end_session))
        .route(
            "/api/v1/sessions/:id/history",
            get(handlers::handle_get_history),
        )
        .route(
            "/api/v1/sessions/:id/emails",
            post(handlers::handle_generate_email),
        )
        .route("/api/v1/extract", post(handlers::handle_extract))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
