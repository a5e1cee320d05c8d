//! S3 storage backend.
//!
//! Objects land at `{folder}/{filename}` in the configured bucket and are
//! served from a public URL prefix (bucket website endpoint or CDN).

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::provider::{StorageError, StorageProvider};

/// Stores files in an S3 bucket.
pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_url: String,
}

impl S3Storage {
    /// Build a backend from the ambient AWS environment (credential chain,
    /// region, endpoint overrides).
    pub async fn from_env(bucket: impl Into<String>, public_url: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        let client = aws_sdk_s3::Client::new(&config);
        Self::with_client(client, bucket, public_url)
    }

    /// Build a backend around an existing client.
    pub fn with_client(
        client: aws_sdk_s3::Client,
        bucket: impl Into<String>,
        public_url: impl Into<String>,
    ) -> Self {
        let mut base = public_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            client,
            bucket: bucket.into(),
            public_url: base,
        }
    }
}

#[async_trait]
impl StorageProvider for S3Storage {
    async fn store(
        &self,
        folder: &str,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let key = format!("{folder}/{filename}");
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            "Stored object in S3"
        );
        Ok(format!("{}/{key}", self.public_url))
    }

    fn name(&self) -> &'static str {
        "s3"
    }
}
