pub mod decoder;
pub mod error;
pub mod model;
pub mod narration;
pub mod prompt;
pub mod service;

pub use decoder::{decode_story, strip_code_fence};
pub use error::{DecodeError, NarrationError, StoryServiceError};
pub use model::{DifficultyLevel, Sentence, StoryDocument, StoryRequest, TextSpan};
pub use narration::{NarrationPipeline, DEFAULT_NARRATION_CONCURRENCY};
pub use prompt::build_prompt;
pub use service::{StoryService, StoryServiceApi};

use serde::{Deserialize, Serialize};

/// Body of POST /generate_story as received.
/// Every field is optional here so missing ones can be reported by name.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerateStoryRequest {
    pub native_language: Option<String>,
    pub target_language: Option<String>,
    pub genre: Option<String>,
    pub difficulty_level: Option<String>,
    pub voice: Option<String>,
}

/// Response for POST /generate_story
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateStoryResponse {
    pub document_path: String,
}

impl GenerateStoryRequest {
    /// Reject missing or blank fields and unknown difficulty levels
    pub fn validate(self) -> Result<StoryRequest, StoryServiceError> {
        let native_language = required("native_language", self.native_language)?;
        let target_language = required("target_language", self.target_language)?;
        let genre = required("genre", self.genre)?;
        let difficulty_label = required("difficulty_level", self.difficulty_level)?;
        let voice = required("voice", self.voice)?;

        let difficulty_level = DifficultyLevel::from_label(&difficulty_label).ok_or_else(|| {
            StoryServiceError::Invalid(format!(
                "difficulty_level must be one of: {}",
                DifficultyLevel::ALL
                    .iter()
                    .map(DifficultyLevel::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?;

        Ok(StoryRequest {
            native_language,
            target_language,
            genre,
            difficulty_level,
            voice,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, StoryServiceError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(StoryServiceError::Invalid(format!(
            "{} is required",
            field
        ))),
    }
}
