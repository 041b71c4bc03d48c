//! Connection handles
//!
//! A connection handle is the sending half of one live WebSocket. Sessions
//! hold handles; the connection's own writer task drains the queue behind it.

mod close_reason;
mod handle;
mod outbound;

pub use close_reason::CloseReason;
pub use handle::{ConnectionHandle, ConnectionId};
pub use outbound::{CountFilter, OutboundFrame};
