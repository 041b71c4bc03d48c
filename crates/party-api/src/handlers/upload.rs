//! Upload handler
//!
//! Stores an uploaded audio file under a freshly generated session id.

use std::ffi::OsStr;
use std::path::Path;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use party_common::AppError;
use party_core::SessionId;
use serde::Serialize;

use crate::response::ApiResult;
use crate::state::AppState;

/// Multipart field carrying the audio file
pub const AUDIO_FIELD: &str = "audio";

/// Upload response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub room_id: String,
    pub message: &'static str,
}

/// Upload an audio file and open a session for it
///
/// POST /upload
///
/// The file is streamed to the store chunk by chunk. Any failure before the
/// commit discards what was written.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let mut multipart = multipart?;

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let id = SessionId::generate();
        let extension = field
            .file_name()
            .and_then(|name| Path::new(name).extension())
            .and_then(OsStr::to_str)
            .map(str::to_owned);

        let mut sink = state
            .store()
            .create(&id, extension.as_deref())
            .await
            .map_err(AppError::from)?;

        while let Some(chunk) = field.chunk().await? {
            sink.write(&chunk).await.map_err(AppError::from)?;
        }

        let bytes = sink.written();
        sink.commit().await.map_err(AppError::from)?;

        tracing::info!(session_id = %id, bytes, "Audio uploaded");

        return Ok(Json(UploadResponse {
            room_id: id.into_inner(),
            message: "File uploaded successfully",
        }));
    }

    Err(AppError::invalid_input("No file provided").into())
}
