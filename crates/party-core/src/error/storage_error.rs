//! Media storage errors

use thiserror::Error;

/// Errors raised by [`MediaStore`](crate::MediaStore) implementations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Media file too large: max {max} bytes")]
    TooLarge { max: usize },

    #[error("Storage error: {0}")]
    Other(String),
}

impl StorageError {
    /// Check if this error was caused by the client rather than the backend
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::TooLarge { .. })
    }
}
