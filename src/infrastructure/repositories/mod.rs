pub mod audio_storage_repository;
pub mod gcs_audio_storage_repository;
pub mod google_tts_repository;
pub mod openai_story_generator;
pub mod polly_tts_repository;
pub mod s3_audio_storage_repository;
pub mod story_generator;
pub mod story_repository;
pub mod tts_repository;
pub mod vertex_story_generator;

pub use audio_storage_repository::{AudioStorageRepository, MP3_CONTENT_TYPE};
pub use gcs_audio_storage_repository::GcsAudioStorageRepository;
pub use google_tts_repository::GoogleTtsRepository;
pub use openai_story_generator::OpenAiStoryGenerator;
pub use polly_tts_repository::PollyTtsRepository;
pub use s3_audio_storage_repository::S3AudioStorageRepository;
pub use story_generator::StoryGenerator;
pub use story_repository::{PgStoryRepository, StoryRepository};
pub use tts_repository::TtsRepository;
pub use vertex_story_generator::VertexStoryGenerator;
