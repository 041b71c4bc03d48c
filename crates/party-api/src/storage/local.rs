//! Local filesystem media store
//!
//! Assets are written flat into one directory as `<id>` or `<id>.<ext>`.
//! Uploads stream into a hidden `.<id>.part` file that is renamed into place
//! on commit.

use async_trait::async_trait;
use party_core::{MediaSink, MediaStore, SessionId, StorageError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Longest extension kept from a client file name
const MAX_EXTENSION_LEN: usize = 10;

/// Keep a client-supplied extension only if it is short and alphanumeric
///
/// Accepts the extension with or without its leading dot. The result is
/// lowercased.
pub fn sanitize_extension(extension: &str) -> Option<String> {
    let extension = extension.strip_prefix('.').unwrap_or(extension);

    let valid = !extension.is_empty()
        && extension.len() <= MAX_EXTENSION_LEN
        && extension.chars().all(|c| c.is_ascii_alphanumeric());

    valid.then(|| extension.to_ascii_lowercase())
}

/// Media store backed by a local directory
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
    max_bytes: usize,
}

impl LocalMediaStore {
    /// Create a store rooted at `root` that rejects assets over `max_bytes`
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    /// Create the storage directory if it does not exist
    pub async fn init(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Get the storage directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn create(
        &self,
        id: &SessionId,
        extension: Option<&str>,
    ) -> Result<Box<dyn MediaSink>, StorageError> {
        let file_name = match extension.and_then(sanitize_extension) {
            Some(ext) => format!("{id}.{ext}"),
            None => id.to_string(),
        };
        let target = self.root.join(file_name);
        let partial = self.root.join(format!(".{id}.part"));

        let file = File::create(&partial).await?;

        Ok(Box::new(LocalMediaSink {
            id: id.clone(),
            file,
            partial,
            target,
            written: 0,
            max_bytes: self.max_bytes,
            committed: false,
        }))
    }

    async fn locate(&self, id: &SessionId) -> Result<Option<PathBuf>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let prefix = format!("{id}.");
        let mut found: Option<PathBuf> = None;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };

            if name != id.as_str() && !name.starts_with(&prefix) {
                continue;
            }

            if !entry.file_type().await?.is_file() {
                continue;
            }

            // Directory order is unspecified; pick the lowest name
            let path = entry.path();
            if found.as_ref().map_or(true, |current| path < *current) {
                found = Some(path);
            }
        }

        Ok(found)
    }
}

/// An upload in progress in a [`LocalMediaStore`]
#[derive(Debug)]
pub struct LocalMediaSink {
    id: SessionId,
    file: File,
    partial: PathBuf,
    target: PathBuf,
    written: usize,
    max_bytes: usize,
    committed: bool,
}

#[async_trait]
impl MediaSink for LocalMediaSink {
    async fn write(&mut self, chunk: &[u8]) -> Result<(), StorageError> {
        if self.written + chunk.len() > self.max_bytes {
            return Err(StorageError::TooLarge {
                max: self.max_bytes,
            });
        }

        self.file.write_all(chunk).await?;
        self.written += chunk.len();
        Ok(())
    }

    fn written(&self) -> usize {
        self.written
    }

    async fn commit(mut self: Box<Self>) -> Result<PathBuf, StorageError> {
        self.file.flush().await?;
        tokio::fs::rename(&self.partial, &self.target).await?;
        self.committed = true;

        tracing::debug!(
            session_id = %self.id,
            path = %self.target.display(),
            bytes = self.written,
            "Media stored"
        );

        Ok(self.target.clone())
    }
}

impl Drop for LocalMediaSink {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        match std::fs::remove_file(&self.partial) {
            Ok(()) => {
                tracing::debug!(session_id = %self.id, "Discarded partial upload");
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    session_id = %self.id,
                    path = %self.partial.display(),
                    error = %e,
                    "Failed to discard partial upload"
                );
            }
        }
    }
}
