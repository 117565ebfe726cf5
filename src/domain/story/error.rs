use crate::error::AppError;

/// Model output could not be turned into a story document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("empty response")]
    EmptyResponse,
    #[error("malformed JSON: {0}")]
    ParseFailure(String),
    #[error("unexpected document shape: {0}")]
    ShapeError(String),
}

/// A sentence could not be narrated; carries the sentence index
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NarrationError {
    #[error("speech synthesis failed for sentence {index}: {message}")]
    Synthesis { index: usize, message: String },
    #[error("audio upload failed for sentence {index}: {message}")]
    Storage { index: usize, message: String },
}

impl NarrationError {
    pub fn index(&self) -> usize {
        match self {
            NarrationError::Synthesis { index, .. } | NarrationError::Storage { index, .. } => {
                *index
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoryServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("empty generation")]
    EmptyGeneration,
    #[error("generation failed: {0}")]
    Generation(String),
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("narration failed: {0}")]
    Narration(#[from] NarrationError),
    #[error("persistence failed: {0}")]
    Persistence(String),
}

impl From<StoryServiceError> for AppError {
    fn from(err: StoryServiceError) -> Self {
        match err {
            StoryServiceError::Invalid(msg) => AppError::BadRequest(msg),
            StoryServiceError::EmptyGeneration => AppError::EmptyGeneration,
            StoryServiceError::Generation(msg) => AppError::Generation(msg),
            StoryServiceError::Decode(e) => AppError::Decode(e),
            StoryServiceError::Narration(e) => AppError::Narration(e),
            StoryServiceError::Persistence(msg) => AppError::Persistence(msg),
        }
    }
}
