//! Storage traits implemented by infrastructure crates

mod media_store;

pub use media_store::{MediaSink, MediaStore};
