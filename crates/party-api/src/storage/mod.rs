//! Media storage backends

mod local;

pub use local::{sanitize_extension, LocalMediaSink, LocalMediaStore};
