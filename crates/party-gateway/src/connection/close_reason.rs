//! Why a connection left its session

use std::fmt;

/// Reason a connection session loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Peer sent a close frame
    PeerClosed,
    /// Stream ended without a close frame
    StreamEnded,
    /// Inbound frame was not a valid message
    DecodeError,
    /// Reading from the socket failed
    TransportError,
    /// The writer task stopped (socket write failed)
    WriterStopped,
    /// Nothing was received within the configured idle timeout
    IdleTimeout,
}

impl CloseReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PeerClosed => "peer_closed",
            Self::StreamEnded => "stream_ended",
            Self::DecodeError => "decode_error",
            Self::TransportError => "transport_error",
            Self::WriterStopped => "writer_stopped",
            Self::IdleTimeout => "idle_timeout",
        }
    }

    /// Check if the peer ended the session cleanly
    #[must_use]
    pub const fn is_clean(self) -> bool {
        matches!(self, Self::PeerClosed | Self::StreamEnded)
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
