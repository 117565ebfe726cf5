use async_trait::async_trait;

pub const MP3_CONTENT_TYPE: &str = "audio/mpeg";

/// Object storage for synthesized audio blobs (Cloud Storage, S3)
#[async_trait]
pub trait AudioStorageRepository: Send + Sync {
    /// Store `bytes` under `key` and return a reference to the stored object
    /// (e.g. `gs://bucket/key`)
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, String>;
}
