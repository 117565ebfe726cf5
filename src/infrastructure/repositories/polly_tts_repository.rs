use super::tts_repository::TtsRepository;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, LanguageCode, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

/// Voices that support the neural engine (AWS Polly documentation)
const NEURAL_VOICES: &[&str] = &[
    // English
    "Joanna", "Matthew", "Ivy", "Kendra", "Kimberly", "Salli", "Joey", "Justin", "Kevin",
    // Spanish
    "Lupe", "Pedro", "Sergio", // French
    "Lea", "Remi", // German
    "Vicki", "Daniel", // Italian
    "Bianca", "Adriano", // Portuguese
    "Ines", "Camila", "Vitoria", "Thiago", // Japanese
    "Takumi", "Kazuha", "Tomoko", // Korean
    "Seoyeon", // Mandarin Chinese
    "Zhiyu", // Arabic
    "Hala", "Zayd",
];

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Neural when the voice supports it, standard otherwise
    fn engine_for_voice(voice: &str) -> Engine {
        if NEURAL_VOICES.contains(&voice) {
            Engine::Neural
        } else {
            Engine::Standard
        }
    }

    /// Polly infers the language from the voice when no code is sent
    fn language_code(language: &str) -> Option<LanguageCode> {
        LanguageCode::values()
            .contains(&language)
            .then(|| LanguageCode::from(language))
    }

    /// Split text into batches of at most MAX_BATCH_SIZE characters,
    /// preferring whitespace boundaries. Scripts without spaces are cut
    /// at character boundaries.
    fn split_into_batches(text: &str) -> Vec<String> {
        if text.chars().count() <= MAX_BATCH_SIZE {
            return vec![text.to_string()];
        }

        let mut batches = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for word in text.split_inclusive(char::is_whitespace) {
            let word_len = word.chars().count();

            if current_len + word_len > MAX_BATCH_SIZE && !current.is_empty() {
                batches.push(current.trim().to_string());
                current.clear();
                current_len = 0;
            }

            if word_len > MAX_BATCH_SIZE {
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(MAX_BATCH_SIZE) {
                    batches.push(chunk.iter().collect());
                }
                continue;
            }

            current.push_str(word);
            current_len += word_len;
        }

        if !current.trim().is_empty() {
            batches.push(current.trim().to_string());
        }

        batches
    }

    /// Call AWS Polly to synthesize a single text batch
    async fn call_polly(&self, text: &str, language: &str, voice: &str) -> Result<Vec<u8>, String> {
        let engine = Self::engine_for_voice(voice);

        tracing::info!(
            language,
            voice,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(VoiceId::from(voice))
            .set_language_code(Self::language_code(language))
            .output_format(OutputFormat::Mp3)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    language,
                    voice,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {:?}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        Ok(audio_stream.into_bytes().to_vec())
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, text: &str, language: &str, voice: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let batches = Self::split_into_batches(text);
        let mut audio_data = Vec::new();

        for (index, batch) in batches.iter().enumerate() {
            tracing::debug!(batch_index = index, batch_size = batch.len(), "Synthesizing batch");
            audio_data.extend(self.call_polly(batch, language, voice).await?);
        }

        tracing::info!(
            provider = "polly",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }
}
