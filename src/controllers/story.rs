use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::story::{GenerateStoryRequest, GenerateStoryResponse, StoryService, StoryServiceApi},
    error::{AppError, AppResult},
};

pub struct StoryController {
    story_service: Arc<StoryService>,
}

impl StoryController {
    pub fn new(story_service: Arc<StoryService>) -> Self {
        Self { story_service }
    }

    /// POST /generate_story - Generate, narrate and save a story
    pub async fn generate_story(
        State(controller): State<Arc<StoryController>>,
        payload: Result<Json<GenerateStoryRequest>, JsonRejection>,
    ) -> AppResult<Json<GenerateStoryResponse>> {
        // Validate input
        let Json(body) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        let request = body.validate()?;

        let document_path = controller.story_service.generate_story(request).await?;

        Ok(Json(GenerateStoryResponse { document_path }))
    }
}
