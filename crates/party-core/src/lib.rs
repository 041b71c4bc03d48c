//! # party-core
//!
//! Domain layer containing the session identifier value object and the
//! media storage trait. This crate has no dependency on the web framework or
//! the runtime.

pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use error::StorageError;
pub use traits::{MediaSink, MediaStore};
pub use value_objects::{SessionId, SessionIdError};
