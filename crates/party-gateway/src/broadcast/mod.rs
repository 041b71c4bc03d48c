//! Session broadcasting
//!
//! Fans messages out to the members of a session.

mod engine;

pub use engine::{BroadcastReport, Broadcaster, RecipientOutcome};
