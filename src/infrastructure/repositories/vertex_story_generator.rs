use super::story_generator::StoryGenerator;
use crate::infrastructure::google_auth::GoogleCredentials;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined; empty when the model said nothing
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Vertex AI (Gemini) `generateContent` over REST
pub struct VertexStoryGenerator {
    client: reqwest::Client,
    credentials: Arc<GoogleCredentials>,
    endpoint: String,
    model: String,
}

impl VertexStoryGenerator {
    pub fn new(
        client: reqwest::Client,
        credentials: Arc<GoogleCredentials>,
        project: &str,
        location: &str,
        model: String,
    ) -> Self {
        let endpoint = format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models/{model}:generateContent"
        );
        Self {
            client,
            credentials,
            endpoint,
            model,
        }
    }
}

#[async_trait]
impl StoryGenerator for VertexStoryGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, String> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Calling Vertex AI generateContent"
        );

        let token = self.credentials.bearer_token().await?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&json!({
                "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, model = %self.model, "Vertex AI request failed");
                format!("Vertex AI request error: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                model = %self.model,
                "Vertex AI returned an error status"
            );
            return Err(format!("Vertex AI error ({}): {}", status, body));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to read Vertex AI response: {}", e))?;
        let text = payload.text();

        tracing::info!(
            provider = "vertex",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            response_length = text.len(),
            "Story generation completed"
        );

        Ok(text)
    }
}
