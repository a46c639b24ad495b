use tokio::sync::oneshot;

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the completion actor.
#[derive(Debug)]
pub enum CompletionMessage {
    /// A request to complete a prompt.
    Complete {
        prompt: String,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        /// A channel to send the completion text back.
        responder: oneshot::Sender<Result<String, AppError>>,
    },
}
