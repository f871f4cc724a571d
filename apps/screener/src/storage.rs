use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

/// Upload directory with collision-free storage keys.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    retain: bool,
}

/// A stored upload. The key is `<uuid>` plus the client's extension, if any.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub key: String,
    pub path: PathBuf,
}

impl UploadStore {
    /// Creates the upload directory if it does not exist yet.
    pub async fn open(dir: impl Into<PathBuf>, retain: bool) -> std::io::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir, retain })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn save(&self, original_filename: &str, bytes: &[u8]) -> std::io::Result<StoredUpload> {
        let key = storage_key(original_filename);
        let path = self.dir.join(&key);
        tokio::fs::write(&path, bytes).await?;
        debug!(key = %key, bytes = bytes.len(), "Upload stored");
        Ok(StoredUpload { key, path })
    }

    /// Removes a stored upload unless uploads are retained.
    pub async fn release(&self, upload: &StoredUpload) {
        if self.retain {
            return;
        }
        if let Err(e) = tokio::fs::remove_file(&upload.path).await {
            warn!(key = %upload.key, "Failed to remove upload: {e}");
        }
    }
}

/// Random key that keeps only a sanitized extension from the client filename.
fn storage_key(original_filename: &str) -> String {
    let ext = Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase());

    let id = Uuid::new_v4();
    match ext {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}
