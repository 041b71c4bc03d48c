//! Gateway error types

use party_core::SessionId;
use thiserror::Error;

/// Gateway error type
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Inbound frame could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The session emptied out and was torn down before the join completed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Session closed: {0}")]
pub struct SessionClosed(pub SessionId);

/// Failure of a single delivery attempt to one recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The recipient's writer has stopped
    #[error("recipient closed")]
    Closed,

    /// The recipient's outbound queue stayed full for the whole attempt
    #[error("delivery timed out")]
    TimedOut,
}

/// Gateway result type
pub type GatewayResult<T> = Result<T, GatewayError>;
