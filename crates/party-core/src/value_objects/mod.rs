//! Value objects - immutable types that represent domain concepts

mod session_id;

pub use session_id::{SessionId, SessionIdError};
