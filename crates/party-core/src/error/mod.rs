//! Domain errors

mod storage_error;

pub use storage_error::StorageError;
