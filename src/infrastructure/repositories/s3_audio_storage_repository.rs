use super::audio_storage_repository::AudioStorageRepository;
use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use std::sync::Arc;

/// AWS S3 implementation of audio storage
pub struct S3AudioStorageRepository {
    s3_client: Arc<S3Client>,
    bucket: String,
}

impl S3AudioStorageRepository {
    pub fn new(s3_client: Arc<S3Client>, bucket: String) -> Self {
        Self { s3_client, bucket }
    }
}

#[async_trait]
impl AudioStorageRepository for S3AudioStorageRepository {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, String> {
        let size = bytes.len();

        self.s3_client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    bucket = %self.bucket,
                    key,
                    "S3 put_object failed"
                );
                format!("S3 error: {:?}", e)
            })?;

        let reference = format!("s3://{}/{}", self.bucket, key);
        tracing::info!(size, reference = %reference, "Uploaded audio to S3");

        Ok(reference)
    }
}
