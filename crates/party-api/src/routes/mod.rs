//! Route definitions

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use party_common::StorageConfig;
use tower_http::services::ServeDir;

use crate::handlers::{audio, health, pages, upload};
use crate::state::AppState;

/// Allowance for multipart framing on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the main router (excluding health for separate middleware handling)
pub fn create_router(storage: &StorageConfig) -> Router<AppState> {
    Router::new()
        .merge(page_routes())
        .merge(media_routes(storage))
        .nest_service("/static", ServeDir::new(&storage.static_dir))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

/// Player pages
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/room/:id", get(pages::room))
}

/// Upload and playback of media
fn media_routes(storage: &StorageConfig) -> Router<AppState> {
    let body_limit = storage.max_file_size_bytes() + MULTIPART_OVERHEAD;

    Router::new()
        .route(
            "/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/audio/:id", get(audio::get_audio))
}
