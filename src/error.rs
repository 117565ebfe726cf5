use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::story::{DecodeError, NarrationError};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Empty response from Vertex AI")]
    EmptyGeneration,

    #[error("Failed to generate story: {0}")]
    Generation(String),

    // Decode details stay in the logs; clients get the fixed message
    #[error("Failed to decode JSON response")]
    Decode(DecodeError),

    #[error("Failed to narrate story: {0}")]
    Narration(NarrationError),

    #[error("Failed to save story: {0}")]
    Persistence(String),
}

/// Error response structure: a human-readable message plus a stable kind
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::EmptyGeneration
            | Self::Generation(_)
            | Self::Decode(_)
            | Self::Narration(_)
            | Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable identifier separating bad model output from infrastructure failures
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "invalid_request",
            Self::EmptyGeneration => "empty_generation",
            Self::Generation(_) => "generation",
            Self::Decode(_) => "decode",
            Self::Narration(_) => "narration",
            Self::Persistence(_) => "persistence",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            kind: self.kind().to_string(),
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(
            error = %self,
            detail = ?self,
            kind = self.kind(),
            status = %status.as_u16(),
            "Request failed"
        );

        (status, Json(self.to_response())).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
