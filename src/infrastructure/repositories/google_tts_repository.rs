use super::tts_repository::TtsRepository;
use crate::infrastructure::google_auth::GoogleCredentials;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const SYNTHESIZE_URL: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";

/// Google Cloud Text-to-Speech has a limit of 5000 bytes of input per request
const MAX_INPUT_BYTES: usize = 5000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

/// Google Cloud Text-to-Speech implementation of TTS repository
pub struct GoogleTtsRepository {
    client: reqwest::Client,
    credentials: Arc<GoogleCredentials>,
}

impl GoogleTtsRepository {
    pub fn new(client: reqwest::Client, credentials: Arc<GoogleCredentials>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// BCP-47 code for the request. Language names such as "Japanese" are
    /// replaced by the locale prefix of the voice ("ja-JP-Standard-A" gives "ja-JP").
    fn language_code(language: &str, voice: &str) -> String {
        if is_language_tag(language) {
            return language.to_string();
        }

        let locale: Vec<&str> = voice.splitn(3, '-').take(2).collect();
        match locale.as_slice() {
            [primary, region] if is_language_tag(&format!("{}-{}", primary, region)) => {
                format!("{}-{}", primary, region)
            }
            _ => language.to_string(),
        }
    }

    fn request_body(text: &str, language: &str, voice: &str) -> serde_json::Value {
        json!({
            "input": { "text": text },
            "voice": { "languageCode": Self::language_code(language, voice), "name": voice },
            "audioConfig": { "audioEncoding": "MP3" }
        })
    }
}

/// `xx`, `xxx`, optionally followed by alphanumeric subtags of 2 to 8 characters
fn is_language_tag(value: &str) -> bool {
    let mut subtags = value.split('-');
    let primary_ok = subtags
        .next()
        .map(|p| (2..=3).contains(&p.len()) && p.chars().all(|c| c.is_ascii_lowercase()))
        .unwrap_or(false);

    primary_ok
        && subtags.all(|s| (2..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str, language: &str, voice: &str) -> Result<Vec<u8>, String> {
        if text.len() > MAX_INPUT_BYTES {
            return Err(format!(
                "Text is {} bytes, Google TTS accepts at most {}",
                text.len(),
                MAX_INPUT_BYTES
            ));
        }

        let start_time = std::time::Instant::now();

        tracing::info!(
            language,
            voice,
            text_length = text.len(),
            "Calling Google Cloud TTS text:synthesize"
        );

        let token = self.credentials.bearer_token().await?;

        let response = self
            .client
            .post(SYNTHESIZE_URL)
            .bearer_auth(token)
            .json(&Self::request_body(text, language, voice))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, language, voice, "Google TTS request failed");
                format!("Google TTS request error: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                language,
                voice,
                "Google TTS returned an error status"
            );
            return Err(format!("Google TTS error ({}): {}", status, body));
        }

        let payload: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to read Google TTS response: {}", e))?;

        let audio_bytes = STANDARD
            .decode(payload.audio_content.as_bytes())
            .map_err(|e| format!("Failed to decode Google TTS audio content: {}", e))?;

        tracing::info!(
            provider = "google",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio_bytes.len(),
            "TTS synthesis completed"
        );

        Ok(audio_bytes)
    }
}
