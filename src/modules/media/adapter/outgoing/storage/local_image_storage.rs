use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, warn};

use crate::media::application::domain::file_names::final_segment;
use crate::media::application::domain::policies::upload_policy::UploadPolicy;
use crate::media::application::ports::outgoing::{ImageStorage, StorageError, StoredFile};

/// Flat directory of uploaded images on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    root: PathBuf,
    public_url_prefix: String,
}

impl LocalImageStorage {
    pub fn new(policy: &UploadPolicy) -> Self {
        Self {
            root: policy.upload_root.clone(),
            public_url_prefix: policy.public_url_prefix.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn public_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_url_prefix.trim_end_matches('/'), file_name)
    }

    /// Resolves a stored name to an existing file strictly inside the root.
    async fn resolve_inside_root(&self, file_name: &str) -> Option<PathBuf> {
        let root = match fs::canonicalize(&self.root).await {
            Ok(root) => root,
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "Upload root is not accessible");
                return None;
            }
        };

        let target = match fs::canonicalize(self.root.join(file_name)).await {
            Ok(target) => target,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(file_name, "File already gone");
                return None;
            }
            Err(e) => {
                warn!(file_name, error = %e, "Could not resolve stored file");
                return None;
            }
        };

        if target == root || !target.starts_with(&root) {
            error!(file_name, target = %target.display(), "Refusing to delete outside the upload root");
            return None;
        }
        Some(target)
    }
}

/// A bare file name we would have generated: one segment, no traversal, no hidden files.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

fn io_err(e: std::io::Error) -> StorageError {
    StorageError::Io(e.to_string())
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(&self, bytes: &[u8], file_name: &str) -> Result<StoredFile, StorageError> {
        if !is_plain_name(file_name) {
            return Err(StorageError::InvalidName(file_name.to_string()));
        }

        fs::create_dir_all(&self.root).await.map_err(io_err)?;

        let path = self.root.join(file_name);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(io_err)?;

        if let Err(e) = file.write_all(bytes).await {
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(io_err(e));
        }
        file.flush().await.map_err(io_err)?;

        Ok(StoredFile {
            file_name: file_name.to_string(),
            file_path: path.to_string_lossy().into_owned(),
            file_url: self.public_url(file_name),
            size: bytes.len() as u64,
        })
    }

    async fn delete(&self, path_or_url: &str) -> bool {
        let without_query = path_or_url.split(['?', '#']).next().unwrap_or_default();
        let file_name = final_segment(without_query.trim());

        if !is_plain_name(file_name) {
            warn!(path_or_url, "Rejected delete of a non-plain file name");
            return false;
        }

        let Some(target) = self.resolve_inside_root(file_name).await else {
            return false;
        };

        match fs::remove_file(&target).await {
            Ok(()) => {
                debug!(file = %target.display(), "Image file removed");
                true
            }
            Err(e) => {
                warn!(file = %target.display(), error = %e, "Image file removal failed");
                false
            }
        }
    }

    async fn size(&self, file_path: &str) -> Result<u64, StorageError> {
        let file_name = final_segment(file_path);
        if !is_plain_name(file_name) {
            return Err(StorageError::InvalidName(file_path.to_string()));
        }

        let metadata = fs::metadata(self.root.join(file_name)).await.map_err(io_err)?;
        Ok(metadata.len())
    }
}
