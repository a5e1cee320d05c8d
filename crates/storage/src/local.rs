//! Local-filesystem storage backend.
//!
//! Writes uploads under a root directory (`UPLOAD_DIR`), which the API
//! serves back at `/uploads`. Suited to single-node deployments and
//! development.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::provider::{StorageError, StorageProvider};

/// Stores files on the local disk.
pub struct LocalStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    /// Create a backend rooted at `root`. `public_base_url` is the external
    /// origin files are served from, without a trailing slash.
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let mut base = public_base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            root: root.into(),
            public_base_url: base,
        }
    }
}

#[async_trait]
impl StorageProvider for LocalStorage {
    async fn store(
        &self,
        folder: &str,
        filename: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(filename);
        tokio::fs::write(&path, &bytes).await?;

        tracing::debug!(
            path = %path.display(),
            size_bytes = bytes.len(),
            "Stored file on local disk"
        );
        Ok(format!(
            "{}/uploads/{folder}/{filename}",
            self.public_base_url
        ))
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_writes_bytes_and_returns_url() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storage = LocalStorage::new(dir.path(), "http://localhost:8080");

        let url = storage
            .store("projects", "cover.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();
        assert_eq!(url, "http://localhost:8080/uploads/projects/cover.png");

        let written = std::fs::read(dir.path().join("projects").join("cover.png")).unwrap();
        assert_eq!(written, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn store_creates_missing_folder() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storage = LocalStorage::new(dir.path(), "http://localhost:8080");

        storage
            .store("brand-new", "a.txt", b"hi".to_vec(), "text/plain")
            .await
            .unwrap();
        assert!(dir.path().join("brand-new").is_dir());
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_trimmed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storage = LocalStorage::new(dir.path(), "https://cdn.example.com/");

        let url = storage
            .store("projects", "b.txt", b"x".to_vec(), "text/plain")
            .await
            .unwrap();
        assert_eq!(url, "https://cdn.example.com/uploads/projects/b.txt");
    }

    #[test]
    fn name_is_local() {
        let storage = LocalStorage::new("/tmp/anywhere", "http://localhost:8080");
        assert_eq!(storage.name(), "local");
    }
}
