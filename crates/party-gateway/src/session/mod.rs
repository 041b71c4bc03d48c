//! Session registry and membership
//!
//! The registry maps session ids to live sessions. A session is created
//! lazily on first join and removed when its last member leaves.

mod registry;
mod session;

pub use registry::SessionRegistry;
pub use session::{Session, Snapshot};
