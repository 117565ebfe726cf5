use async_trait::async_trait;

/// Generative text model that writes the raw story
#[async_trait]
pub trait StoryGenerator: Send + Sync {
    /// Send the prompt and return the model's raw text.
    /// An empty string is a valid (if useless) answer, not an error.
    async fn generate(&self, prompt: &str) -> Result<String, String>;
}
