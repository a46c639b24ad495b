use crate::error::AppError;
use async_trait::async_trait;

/// Defines the public interface for a text-completion backend.
///
/// This trait abstracts the specific implementation of the completion service,
/// allowing the hosted API, a local model, or a test double to be used
/// interchangeably by the reframing generator.
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Completes a prompt with explicit sampling parameters. `None` leaves the
    /// provider's configured default in place.
    async fn complete_with_params(
        &self,
        prompt: String,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<String, AppError>;

    /// Completes a prompt with the provider's default parameters.
    async fn complete(&self, prompt: String) -> Result<String, AppError> {
        self.complete_with_params(prompt, None, None).await
    }
}
