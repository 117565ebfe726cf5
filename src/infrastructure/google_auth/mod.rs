use gcp_auth::TokenProvider;
use std::sync::Arc;

/// One scope covers Vertex AI, Text-to-Speech and Cloud Storage
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Source of bearer tokens for the Google Cloud REST repositories
pub enum GoogleCredentials {
    /// Token given in GOOGLE_ACCESS_TOKEN, used as is
    Static(String),
    /// Application Default Credentials; the provider caches and refreshes tokens
    ApplicationDefault(Arc<dyn TokenProvider>),
}

impl GoogleCredentials {
    /// Use the configured token when present, otherwise look up
    /// Application Default Credentials. Fails when neither exists.
    pub async fn from_config(access_token: &str) -> Result<Self, gcp_auth::Error> {
        let access_token = access_token.trim();
        if !access_token.is_empty() {
            tracing::warn!("Using GOOGLE_ACCESS_TOKEN for Google Cloud; it is never refreshed");
            return Ok(Self::Static(access_token.to_string()));
        }

        let provider = gcp_auth::provider().await?;
        tracing::info!("Using Application Default Credentials for Google Cloud");

        Ok(Self::ApplicationDefault(provider))
    }

    pub async fn bearer_token(&self) -> Result<String, String> {
        match self {
            Self::Static(token) => Ok(token.clone()),
            Self::ApplicationDefault(provider) => provider
                .token(&[CLOUD_PLATFORM_SCOPE])
                .await
                .map(|token| token.as_str().to_string())
                .map_err(|e| {
                    tracing::error!(error = %e, "Failed to obtain Google access token");
                    format!("Google auth error: {}", e)
                }),
        }
    }
}
