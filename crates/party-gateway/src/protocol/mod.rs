//! Wire protocol
//!
//! Defines the JSON message exchanged over the realtime channel.

mod messages;

pub use messages::{MessageKind, SyncMessage, USER_COUNT_TYPE};
