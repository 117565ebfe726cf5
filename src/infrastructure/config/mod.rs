use serde::Deserialize;
use std::env;

use crate::domain::story::{service::DEFAULT_STORY_COLLECTION, DEFAULT_NARRATION_CONCURRENCY};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Story generation
    pub story_generator: GeneratorProvider,
    pub vertex_project: String,
    pub vertex_location: String,
    pub vertex_model: String,
    /// Overrides Application Default Credentials when non-empty
    pub google_access_token: String,
    pub openai_model: String,
    // Narration
    pub tts_provider: TtsProvider,
    pub audio_storage: AudioStorageProvider,
    pub audio_bucket: String,
    pub aws_region: String,
    pub narration_concurrency: usize,
    // Persistence
    pub story_collection: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorProvider {
    Vertex,
    OpenAi,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Google,
    Polly,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AudioStorageProvider {
    Gcs,
    S3,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env_or("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env_or("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            story_generator: parse_generator(&env_or("STORY_GENERATOR", "vertex"))?,
            vertex_project: env_or("VERTEX_PROJECT", "kataru-b341b"),
            vertex_location: env_or("VERTEX_LOCATION", "us-central1"),
            vertex_model: env_or("VERTEX_MODEL", "gemini-pro"),
            google_access_token: env_or("GOOGLE_ACCESS_TOKEN", ""),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            tts_provider: parse_tts_provider(&env_or("TTS_PROVIDER", "google"))?,
            audio_storage: parse_audio_storage(&env_or("AUDIO_STORAGE", "gcs"))?,
            audio_bucket: env_or("AUDIO_BUCKET", "kataru-b341b.appspot.com"),
            aws_region: env_or("AWS_REGION", "eu-west-1"),
            narration_concurrency: env_or(
                "NARRATION_CONCURRENCY",
                &DEFAULT_NARRATION_CONCURRENCY.to_string(),
            )
            .parse::<usize>()?
            .max(1),
            story_collection: env_or("STORY_COLLECTION", DEFAULT_STORY_COLLECTION),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Whether any configured provider talks to Google Cloud REST APIs
    pub fn uses_google_cloud(&self) -> bool {
        self.story_generator == GeneratorProvider::Vertex
            || self.tts_provider == TtsProvider::Google
            || self.audio_storage == AudioStorageProvider::Gcs
    }

    /// Whether any configured provider needs the AWS SDK
    pub fn uses_aws(&self) -> bool {
        self.tts_provider == TtsProvider::Polly || self.audio_storage == AudioStorageProvider::S3
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_generator(value: &str) -> Result<GeneratorProvider, String> {
    match value.to_lowercase().as_str() {
        "vertex" => Ok(GeneratorProvider::Vertex),
        "openai" => Ok(GeneratorProvider::OpenAi),
        other => Err(format!("Unknown STORY_GENERATOR: {}", other)),
    }
}

fn parse_tts_provider(value: &str) -> Result<TtsProvider, String> {
    match value.to_lowercase().as_str() {
        "google" => Ok(TtsProvider::Google),
        "polly" => Ok(TtsProvider::Polly),
        other => Err(format!("Unknown TTS_PROVIDER: {}", other)),
    }
}

fn parse_audio_storage(value: &str) -> Result<AudioStorageProvider, String> {
    match value.to_lowercase().as_str() {
        "gcs" => Ok(AudioStorageProvider::Gcs),
        "s3" => Ok(AudioStorageProvider::S3),
        other => Err(format!("Unknown AUDIO_STORAGE: {}", other)),
    }
}
