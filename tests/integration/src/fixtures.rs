//! Test fixtures and data generators

use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A session name no other test uses
pub fn unique_session() -> String {
    format!("room-{}", unique_suffix())
}

/// Bytes standing in for an MP3 file
pub fn sample_audio() -> Vec<u8> {
    let mut data = b"ID3\x04\x00\x00\x00\x00\x00\x00".to_vec();
    data.extend((0..4096u32).map(|i| (i % 251) as u8));
    data
}

/// Landing page written into the test static directory
pub const INDEX_HTML: &str = "<!doctype html><title>Listening Party</title>";

/// Player page written into the test static directory
pub const ROOM_HTML: &str = "<!doctype html><title>Room</title>";

/// Upload response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub room_id: String,
    pub message: String,
}

/// Health response
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub sessions: usize,
    pub timestamp: String,
}

/// Error response body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
