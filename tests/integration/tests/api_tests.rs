//! HTTP integration tests
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use reqwest::{multipart, StatusCode};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.expect("Request failed");
    let health: HealthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(health.status, "ok");
    assert_eq!(health.sessions, 0);
    assert!(!health.timestamp.is_empty());
}

#[tokio::test]
async fn test_health_counts_live_sessions() {
    let server = TestServer::start().await.expect("Failed to start server");
    let _listener = server.join(&unique_session(), 1).await.unwrap();

    let response = server.get("/health").await.unwrap();
    let health: HealthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(health.sessions, 1);
}

// ============================================================================
// Upload and Playback Tests
// ============================================================================

#[tokio::test]
async fn test_upload_then_fetch_audio() {
    let server = TestServer::start().await.expect("Failed to start server");
    let audio = sample_audio();

    let response = server.upload("song.mp3", audio.clone()).await.unwrap();
    let upload: UploadResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(upload.message, "File uploaded successfully");
    assert_eq!(upload.room_id.len(), 16);
    assert!(upload
        .room_id
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    assert!(server
        .upload_dir()
        .join(format!("{}.mp3", upload.room_id))
        .is_file());

    let response = server
        .get(&format!("/audio/{}", upload.room_id))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("audio/mpeg")
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), audio.as_slice());
}

#[tokio::test]
async fn test_uploads_get_distinct_ids() {
    let server = TestServer::start().await.expect("Failed to start server");

    let first: UploadResponse = assert_json(
        server.upload("a.mp3", sample_audio()).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let second: UploadResponse = assert_json(
        server.upload("a.mp3", sample_audio()).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();

    assert_ne!(first.room_id, second.room_id);
}

#[tokio::test]
async fn test_upload_without_extension() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.upload("recording", sample_audio()).await.unwrap();
    let upload: UploadResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(server.upload_dir().join(&upload.room_id).is_file());
    let response = server
        .get(&format!("/audio/{}", upload.room_id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_upload_without_audio_field() {
    let server = TestServer::start().await.expect("Failed to start server");

    let form = multipart::Form::new().text("title", "no file here");
    let response = server.post_form(form).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "INVALID_INPUT");
    assert_eq!(body.error.message, "Invalid input: No file provided");
}

#[tokio::test]
async fn test_upload_over_limit_is_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");

    // Limit is 1 MB in the test config
    let response = server
        .upload("big.mp3", vec![0u8; 2 * 1024 * 1024])
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::PAYLOAD_TOO_LARGE)
        .await
        .unwrap();
    assert_eq!(body.error.code, "PAYLOAD_TOO_LARGE");

    let mut entries = tokio::fs::read_dir(server.upload_dir()).await.unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}

#[tokio::test]
async fn test_upload_requires_multipart() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .client
        .post(format!("{}/upload", server.base_url()))
        .body("plain")
        .send()
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_MULTIPART");
}

#[tokio::test]
async fn test_audio_not_found() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/audio/0123456789abcdef").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_audio_rejects_malformed_id() {
    let server = TestServer::start().await.expect("Failed to start server");

    for id in ["abc123", "0123456789abcdeg", "0123456789ABCDEF"] {
        let response = server.get(&format!("/audio/{id}")).await.unwrap();
        assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
    }
}

// ============================================================================
// Page Tests
// ============================================================================

#[tokio::test]
async fn test_index_page() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), INDEX_HTML);
}

#[tokio::test]
async fn test_room_page_for_any_id() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/room/abc123").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), ROOM_HTML);
}

#[tokio::test]
async fn test_static_assets() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/static/player.js").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = server.get("/static/missing.js").await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Middleware Tests
// ============================================================================

#[tokio::test]
async fn test_request_id_header() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
