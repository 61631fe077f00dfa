use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage name: {0}")]
    InvalidName(String),

    #[error("Storage I/O error: {0}")]
    Io(String),
}

/// Where a stored file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub file_name: String,
    pub file_path: String,
    pub file_url: String,
    pub size: u64,
}

#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Writes `bytes` under the upload root as `file_name`. The name must be a
    /// single path segment.
    async fn store(&self, bytes: &[u8], file_name: &str) -> Result<StoredFile, StorageError>;

    /// Best-effort removal. Only the final segment of `path_or_url` is used and the
    /// result must resolve inside the upload root; every failure yields `false`.
    async fn delete(&self, path_or_url: &str) -> bool;

    async fn size(&self, file_path: &str) -> Result<u64, StorageError>;
}
