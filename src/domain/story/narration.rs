use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use uuid::Uuid;

use super::error::NarrationError;
use super::model::{Sentence, StoryDocument};
use crate::infrastructure::repositories::{AudioStorageRepository, TtsRepository, MP3_CONTENT_TYPE};

pub const DEFAULT_NARRATION_CONCURRENCY: usize = 4;

/// Synthesizes and stores audio for every sentence of a story.
///
/// Sentences are independent, so up to `concurrency` of them are in flight at
/// once. Results are reassembled by sentence index, never by completion order.
/// The first failure aborts the whole narration.
pub struct NarrationPipeline {
    tts_repo: Arc<dyn TtsRepository>,
    audio_storage: Arc<dyn AudioStorageRepository>,
    concurrency: usize,
}

impl NarrationPipeline {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        audio_storage: Arc<dyn AudioStorageRepository>,
        concurrency: usize,
    ) -> Self {
        Self {
            tts_repo,
            audio_storage,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn narrate(
        &self,
        mut document: StoryDocument,
        language: &str,
        voice: &str,
    ) -> Result<StoryDocument, NarrationError> {
        let start_time = std::time::Instant::now();
        let sentence_count = document.story.len();

        tracing::info!(
            sentence_count,
            concurrency = self.concurrency,
            language,
            voice,
            "Narrating story"
        );

        // Owned texts keep the stream free of borrows into `document`
        let texts: Vec<(usize, String)> = document
            .story
            .iter()
            .map(Sentence::speakable_text)
            .enumerate()
            .collect();

        // `buffered` yields in input order, so links line up with sentences
        let links: Vec<String> = stream::iter(texts)
            .map(|(index, text)| self.narrate_sentence(index, text, language, voice))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        for (sentence, link) in document.story.iter_mut().zip(links) {
            sentence.audio_link = Some(link);
        }

        tracing::info!(
            sentence_count,
            latency_ms = start_time.elapsed().as_millis(),
            "Story narrated"
        );

        Ok(document)
    }

    async fn narrate_sentence(
        &self,
        index: usize,
        text: String,
        language: &str,
        voice: &str,
    ) -> Result<String, NarrationError> {
        tracing::debug!(
            sentence_index = index,
            text_length = text.len(),
            "Synthesizing sentence"
        );

        let audio = self
            .tts_repo
            .synthesize(&text, language, voice)
            .await
            .map_err(|message| NarrationError::Synthesis { index, message })?;

        let key = format!("{}.mp3", Uuid::new_v4());
        let audio_size = audio.len();

        let link = self
            .audio_storage
            .put(&key, audio, MP3_CONTENT_TYPE)
            .await
            .map_err(|message| NarrationError::Storage { index, message })?;

        tracing::info!(
            sentence_index = index,
            audio_size,
            audio_link = %link,
            "Sentence audio stored"
        );

        Ok(link)
    }
}
