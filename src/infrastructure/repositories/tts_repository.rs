use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Google Cloud TTS, AWS Polly)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Mapping the language/voice pair onto the provider's voice selection
/// - Returning compressed (MP3) audio
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech with an explicit voice
    ///
    /// Returns audio data ready for playback (MP3 format)
    ///
    /// # Arguments
    /// * `text` - The speakable text of one sentence
    /// * `language` - Language code passed through to the provider (e.g. "ja-JP")
    /// * `voice` - Provider voice name (e.g. "ja-JP-Standard-A")
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable
    async fn synthesize(&self, text: &str, language: &str, voice: &str) -> Result<Vec<u8>, String>;
}
