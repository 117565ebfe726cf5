use super::decoder::decode_story;
use super::error::StoryServiceError;
use super::model::StoryRequest;
use super::narration::NarrationPipeline;
use super::prompt::build_prompt;
use crate::infrastructure::repositories::{StoryGenerator, StoryRepository};
use async_trait::async_trait;
use std::sync::Arc;

pub const DEFAULT_STORY_COLLECTION: &str = "stories";

pub struct StoryService {
    generator: Arc<dyn StoryGenerator>,
    narration: NarrationPipeline,
    story_repo: Arc<dyn StoryRepository>,
    collection: String,
}

impl StoryService {
    pub fn new(
        generator: Arc<dyn StoryGenerator>,
        narration: NarrationPipeline,
        story_repo: Arc<dyn StoryRepository>,
        collection: String,
    ) -> Self {
        Self {
            generator,
            narration,
            story_repo,
            collection,
        }
    }
}

#[async_trait]
pub trait StoryServiceApi: Send + Sync {
    /// Generate, narrate and persist a story
    ///
    /// This operation:
    /// - Builds the prompt and asks the model for a story
    /// - Decodes the model output into sentences
    /// - Synthesizes and stores audio for every sentence
    /// - Saves the document with the request attached as metadata
    ///
    /// Returns the path of the new record. Nothing is written when generation
    /// or decoding fails.
    async fn generate_story(&self, request: StoryRequest) -> Result<String, StoryServiceError>;
}

#[async_trait]
impl StoryServiceApi for StoryService {
    async fn generate_story(&self, request: StoryRequest) -> Result<String, StoryServiceError> {
        tracing::info!(
            native_language = %request.native_language,
            target_language = %request.target_language,
            genre = %request.genre,
            difficulty_level = %request.difficulty_level,
            voice = %request.voice,
            "Story generation request"
        );

        // 1. Build the prompt
        let prompt = build_prompt(
            &request.native_language,
            &request.target_language,
            &request.genre,
            request.difficulty_level.as_str(),
        );
        tracing::debug!(prompt_length = prompt.len(), prompt = %prompt, "Prompt built");

        // 2. Ask the model
        let raw_text = self
            .generator
            .generate(&prompt)
            .await
            .map_err(StoryServiceError::Generation)?;

        if raw_text.trim().is_empty() {
            tracing::warn!("Model returned an empty response");
            return Err(StoryServiceError::EmptyGeneration);
        }
        tracing::debug!(response_length = raw_text.len(), raw_text = %raw_text, "Raw model response");

        // 3. Decode
        let document = decode_story(&raw_text).map_err(|e| {
            tracing::warn!(error = %e, response_length = raw_text.len(), "Failed to decode model response");
            e
        })?;
        tracing::info!(sentence_count = document.story.len(), "Story decoded");

        // 4. Narrate every sentence
        let document = self
            .narration
            .narrate(document, &request.target_language, &request.voice)
            .await?;

        // 5. Attach metadata and persist
        let document = document.with_metadata(request);
        let document_path = self
            .story_repo
            .create(&self.collection, &document)
            .await
            .map_err(StoryServiceError::Persistence)?;

        tracing::info!(
            document_path = %document_path,
            sentence_count = document.story.len(),
            "Story saved"
        );

        Ok(document_path)
    }
}
