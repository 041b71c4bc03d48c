//! Page handlers
//!
//! The player pages are static files in the configured static directory.

use std::path::Path;

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::state::AppState;

/// Landing page with the upload form
pub const INDEX_PAGE: &str = "index.html";

/// Player page for a session
pub const ROOM_PAGE: &str = "room.html";

/// GET /
pub async fn index(State(state): State<AppState>, request: Request) -> Response {
    serve_page(&state, INDEX_PAGE, request).await
}

/// GET /room/:id
///
/// The page reads the session id from its own URL.
pub async fn room(State(state): State<AppState>, request: Request) -> Response {
    serve_page(&state, ROOM_PAGE, request).await
}

async fn serve_page(state: &AppState, page: &str, request: Request) -> Response {
    let path = Path::new(&state.config().storage.static_dir).join(page);

    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
