pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, story::StoryController};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::StoryRepository;

/// Build the application router with all routes and layers
pub fn create_router(
    story_controller: Arc<StoryController>,
    story_repo: Arc<dyn StoryRepository>,
) -> Router {
    let story_routes = Router::new()
        .route("/generate_story", post(StoryController::generate_story))
        .with_state(story_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(story_repo)
        .merge(story_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    story_controller: Arc<StoryController>,
    story_repo: Arc<dyn StoryRepository>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(story_controller, story_repo);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
