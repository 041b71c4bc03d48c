//! Media store trait
//!
//! Abstracts where uploaded media assets live. Assets are addressed by the
//! session identifier they were uploaded under.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::StorageError;
use crate::value_objects::SessionId;

/// Storage for uploaded media assets
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Start writing an asset for `id`, keeping the original file extension
    /// if any
    ///
    /// Nothing is visible to [`locate`](Self::locate) until the sink is
    /// committed.
    async fn create(
        &self,
        id: &SessionId,
        extension: Option<&str>,
    ) -> Result<Box<dyn MediaSink>, StorageError>;

    /// Locate a previously stored asset for `id`
    async fn locate(&self, id: &SessionId) -> Result<Option<PathBuf>, StorageError>;

    /// Store `data` for `id` in one go
    ///
    /// Returns the location the asset was written to.
    async fn save(
        &self,
        id: &SessionId,
        extension: Option<&str>,
        data: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let mut sink = self.create(id, extension).await?;
        sink.write(data).await?;
        sink.commit().await
    }
}

/// An asset being written
///
/// Dropping a sink without committing discards what was written.
#[async_trait]
pub trait MediaSink: Send {
    /// Append a chunk
    async fn write(&mut self, chunk: &[u8]) -> Result<(), StorageError>;

    /// Bytes written so far
    fn written(&self) -> usize;

    /// Finish the asset and return where it was stored
    async fn commit(self: Box<Self>) -> Result<PathBuf, StorageError>;
}
