//! Media handler
//!
//! Streams the stored asset for a session.

use axum::{
    extract::{Path, Request, State},
    response::{IntoResponse, Response},
};
use party_common::AppError;
use party_core::SessionId;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::response::ApiResult;
use crate::state::AppState;

/// Serve the audio file uploaded for a session
///
/// GET /audio/:id
pub async fn get_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> ApiResult<Response> {
    // Only generated ids can have an asset
    let id = SessionId::parse(&id).map_err(|_| AppError::not_found("Audio file"))?;

    let path = state
        .store()
        .locate(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Audio file"))?;

    tracing::debug!(session_id = %id, path = %path.display(), "Serving audio");

    let response = match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    Ok(response.into_response())
}
