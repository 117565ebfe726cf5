use super::audio_storage_repository::AudioStorageRepository;
use crate::infrastructure::google_auth::GoogleCredentials;
use async_trait::async_trait;
use std::sync::Arc;

const UPLOAD_BASE_URL: &str = "https://storage.googleapis.com/upload/storage/v1";

/// Google Cloud Storage implementation using the JSON API simple upload
pub struct GcsAudioStorageRepository {
    client: reqwest::Client,
    credentials: Arc<GoogleCredentials>,
    bucket: String,
}

impl GcsAudioStorageRepository {
    pub fn new(client: reqwest::Client, credentials: Arc<GoogleCredentials>, bucket: String) -> Self {
        Self {
            client,
            credentials,
            bucket,
        }
    }

    fn upload_url(&self, key: &str) -> String {
        format!(
            "{}/b/{}/o?uploadType=media&name={}",
            UPLOAD_BASE_URL,
            urlencoding::encode(&self.bucket),
            urlencoding::encode(key)
        )
    }

    fn object_reference(&self, key: &str) -> String {
        format!("gs://{}/{}", self.bucket, key)
    }
}

#[async_trait]
impl AudioStorageRepository for GcsAudioStorageRepository {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, String> {
        let size = bytes.len();
        let token = self.credentials.bearer_token().await?;

        let response = self
            .client
            .post(self.upload_url(key))
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, bucket = %self.bucket, key, "GCS upload request failed");
                format!("GCS upload error: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                bucket = %self.bucket,
                key,
                "GCS upload returned an error status"
            );
            return Err(format!("GCS upload error ({}): {}", status, body));
        }

        let reference = self.object_reference(key);
        tracing::info!(size, reference = %reference, "Uploaded audio to Cloud Storage");

        Ok(reference)
    }
}
