use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use kataru_backend::controllers::story::StoryController;
use kataru_backend::domain::story::{NarrationPipeline, StoryService};
use kataru_backend::infrastructure::config::{
    AudioStorageProvider, Config, GeneratorProvider, LogFormat, TtsProvider,
};
use kataru_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use kataru_backend::infrastructure::google_auth::GoogleCredentials;
use kataru_backend::infrastructure::http::start_http_server;
use kataru_backend::infrastructure::repositories::{
    AudioStorageRepository, GcsAudioStorageRepository, GoogleTtsRepository, OpenAiStoryGenerator,
    PgStoryRepository, PollyTtsRepository, S3AudioStorageRepository, StoryGenerator,
    StoryRepository, TtsRepository, VertexStoryGenerator,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Kataru Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    check_connection(&pool).await?;
    run_migrations(&pool).await?;
    tracing::info!("Database connection verified and migrations applied");

    // Startup fails here when a Google provider is selected without credentials
    let google_credentials = if config.uses_google_cloud() {
        Some(Arc::new(
            GoogleCredentials::from_config(&config.google_access_token).await?,
        ))
    } else {
        None
    };

    let http_client = reqwest::Client::new();
    let aws_config = if config.uses_aws() {
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()))
            .load()
            .await;
        tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");
        Some(aws_config)
    } else {
        None
    };

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let story_repo: Arc<dyn StoryRepository> = Arc::new(PgStoryRepository::new(pool.clone()));

    let generator: Arc<dyn StoryGenerator> =
        match (&config.story_generator, &google_credentials) {
            (GeneratorProvider::Vertex, Some(credentials)) => Arc::new(VertexStoryGenerator::new(
                http_client.clone(),
                credentials.clone(),
                &config.vertex_project,
                &config.vertex_location,
                config.vertex_model.clone(),
            )),
            (GeneratorProvider::OpenAi, _) => Arc::new(OpenAiStoryGenerator::new(
                Arc::new(async_openai::Client::new()),
                config.openai_model.clone(),
            )),
            (GeneratorProvider::Vertex, None) => {
                return Err("Vertex AI selected without Google credentials".into())
            }
        };

    let tts_repo: Arc<dyn TtsRepository> =
        match (&config.tts_provider, &aws_config, &google_credentials) {
            (TtsProvider::Polly, Some(aws_config), _) => Arc::new(PollyTtsRepository::new(
                Arc::new(aws_sdk_polly::Client::new(aws_config)),
            )),
            (TtsProvider::Google, _, Some(credentials)) => Arc::new(GoogleTtsRepository::new(
                http_client.clone(),
                credentials.clone(),
            )),
            _ => return Err("TTS provider selected without its credentials".into()),
        };

    let audio_storage: Arc<dyn AudioStorageRepository> =
        match (&config.audio_storage, &aws_config, &google_credentials) {
            (AudioStorageProvider::S3, Some(aws_config), _) => {
                Arc::new(S3AudioStorageRepository::new(
                    Arc::new(aws_sdk_s3::Client::new(aws_config)),
                    config.audio_bucket.clone(),
                ))
            }
            (AudioStorageProvider::Gcs, _, Some(credentials)) => {
                Arc::new(GcsAudioStorageRepository::new(
                    http_client.clone(),
                    credentials.clone(),
                    config.audio_bucket.clone(),
                ))
            }
            _ => return Err("Audio storage selected without its credentials".into()),
        };

    tracing::info!(
        story_generator = ?config.story_generator,
        tts_provider = ?config.tts_provider,
        audio_storage = ?config.audio_storage,
        audio_bucket = %config.audio_bucket,
        narration_concurrency = config.narration_concurrency,
        "Providers configured"
    );

    // 2. Instantiate services
    tracing::info!("Instantiating services...");
    let narration = NarrationPipeline::new(tts_repo, audio_storage, config.narration_concurrency);
    let story_service = Arc::new(StoryService::new(
        generator,
        narration,
        story_repo.clone(),
        config.story_collection.clone(),
    ));

    // 3. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let story_controller = Arc::new(StoryController::new(story_service));

    // Start HTTP server with all routes
    start_http_server(config, story_controller, story_repo).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "kataru_backend=debug,tower_http=debug"
    } else {
        "kataru_backend=info,tower_http=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
