//! # party-gateway
//!
//! WebSocket gateway that keeps listening sessions in sync. Participants join
//! a session by id, every playback event they send is relayed to the other
//! participants, and membership changes are announced as participant counts.

pub mod broadcast;
pub mod connection;
pub mod error;
pub mod protocol;
pub mod server;
pub mod session;

pub use broadcast::{BroadcastReport, Broadcaster, RecipientOutcome};
pub use connection::{CloseReason, ConnectionHandle, ConnectionId, OutboundFrame};
pub use error::{DeliveryError, GatewayError, SessionClosed};
pub use protocol::{MessageKind, SyncMessage};
pub use server::{create_gateway, create_router, GatewayState};
pub use session::{Session, SessionRegistry, Snapshot};
