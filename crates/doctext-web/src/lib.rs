//! HTTP front end for document text extraction.
//!
//! One route, `POST /extract-text`, takes a multipart upload in the `file`
//! field and answers `{"text": ...}` or `{"error": ...}`.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod models;
pub mod settings;
pub mod state;
pub mod upload;

pub use error::{ApiError, ApiResult};
pub use settings::ServerSettings;
pub use state::AppState;

/// Build the router with all routes and middleware.
pub fn create_router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/extract-text", post(handlers::extract::extract_text))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
