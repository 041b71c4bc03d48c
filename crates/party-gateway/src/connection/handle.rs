//! Connection handle
//!
//! Opaque, comparable reference to one live bidirectional channel.

use super::OutboundFrame;
use crate::error::DeliveryError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::SendTimeoutError};
use uuid::Uuid;

/// Unique identifier of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a new connection ID
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Sending half of a connection, shared with the session it belongs to
///
/// Handles compare equal by connection id only.
#[derive(Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    sender: mpsc::Sender<OutboundFrame>,
}

impl ConnectionHandle {
    /// Create a handle together with the receiving end its writer drains
    #[must_use]
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<OutboundFrame>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        let handle = Self {
            id: ConnectionId::generate(),
            sender,
        };
        (handle, receiver)
    }

    /// Get the connection ID
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue a frame for this connection, waiting at most `timeout` for room
    pub async fn deliver(&self, frame: OutboundFrame, timeout: Duration) -> Result<(), DeliveryError> {
        self.sender
            .send_timeout(frame, timeout)
            .await
            .map_err(|e| match e {
                SendTimeoutError::Closed(_) => DeliveryError::Closed,
                SendTimeoutError::Timeout(_) => DeliveryError::TimedOut,
            })
    }

    /// Check if the writer side has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl PartialEq for ConnectionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConnectionHandle {}

impl Hash for ConnectionHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("id", &self.id)
            .field("closed", &self.is_closed())
            .finish()
    }
}
