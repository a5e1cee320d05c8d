//! Storage backend abstraction.

use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem I/O failed (local backend).
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The bucket request failed (S3 backend).
    #[error("S3 request failed: {0}")]
    S3(String),

    /// The backend is missing required configuration.
    #[error("Storage misconfigured: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// StorageProvider
// ---------------------------------------------------------------------------

/// A place uploaded files can be written to and served from.
///
/// Implementations are shared across handlers behind `Arc<dyn
/// StorageProvider>`, so all methods take `&self`.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Persist `bytes` under `folder/filename` and return the public URL the
    /// file is reachable at.
    async fn store(
        &self,
        folder: &str,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Short backend name for logs and the health endpoint.
    fn name(&self) -> &'static str;
}
