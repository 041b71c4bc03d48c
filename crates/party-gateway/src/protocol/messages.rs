//! Sync message format
//!
//! Every frame on the realtime channel is a flat JSON object:
//!
//! ```json
//! {"type": "play", "roomId": "3f9a0c1d2e4b5a6c", "time": 12.5, "count": 0}
//! ```
//!
//! Missing or null fields decode to zero/empty and unknown fields are
//! dropped, so a relayed frame is the re-encoding of what was decoded.

use serde::{Deserialize, Deserializer, Serialize};

/// Message type synthesized by the server for membership counts
pub const USER_COUNT_TYPE: &str = "user_count";

/// Classification of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Server-generated participant count
    ParticipantCount,
    /// Playback control event relayed between participants
    Control,
}

/// A realtime channel message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncMessage {
    /// Message type (`play`, `pause`, `seek`, `user_count`, ...)
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,

    /// Session the message belongs to, as supplied by the client
    #[serde(rename = "roomId", default, deserialize_with = "null_as_default")]
    pub room_id: String,

    /// Playback position in seconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: f64,

    /// Participant count
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SyncMessage {
    /// Create a participant count message
    #[must_use]
    pub fn user_count(count: usize) -> Self {
        Self {
            kind: USER_COUNT_TYPE.to_string(),
            count: count as i64,
            ..Self::default()
        }
    }

    /// Create a playback control message
    #[must_use]
    pub fn control(kind: impl Into<String>, room_id: impl Into<String>, time: f64) -> Self {
        Self {
            kind: kind.into(),
            room_id: room_id.into(),
            time,
            count: 0,
        }
    }

    #[must_use]
    pub fn message_kind(&self) -> MessageKind {
        if self.kind == USER_COUNT_TYPE {
            MessageKind::ParticipantCount
        } else {
            MessageKind::Control
        }
    }

    /// Parse from a text frame
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Parse from a binary frame
    pub fn from_slice(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
