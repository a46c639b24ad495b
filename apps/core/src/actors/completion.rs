use crate::actors::messages::{AppError, CompletionMessage};
use crate::actors::traits::CompletionProvider;
use crate::config::CompletionConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, error, info};

// --- Constants ---
const MAILBOX_CAPACITY: usize = 32;
/// Extra time the handle waits beyond the HTTP timeout before giving up on the actor.
const REPLY_GRACE: Duration = Duration::from_secs(5);

/// A handle to the completion actor.
///
/// This struct provides a public, cloneable interface for sending messages to the
/// running completion actor. It abstracts away the `mpsc::Sender`.
#[derive(Clone)]
pub struct CompletionActorHandle {
    sender: mpsc::Sender<CompletionMessage>,
    reply_timeout: Duration,
}

impl CompletionActorHandle {
    /// Creates a new completion actor and returns a handle to it.
    ///
    /// This will spawn the `CompletionActorRunner` in a new Tokio task, so it
    /// must be called from within a Tokio runtime.
    pub fn new(config: CompletionConfig) -> Self {
        let (sender, receiver) = mpsc::channel(MAILBOX_CAPACITY);
        let reply_timeout = config.timeout + REPLY_GRACE;
        let actor = CompletionActorRunner::new(receiver, config);
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            reply_timeout,
        }
    }
}

#[async_trait]
impl CompletionProvider for CompletionActorHandle {
    async fn complete_with_params(
        &self,
        prompt: String,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<String, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = CompletionMessage::Complete {
            prompt,
            max_tokens,
            temperature,
            responder: send,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Internal(format!("Completion actor unavailable: {}", e)))?;
        timeout(self.reply_timeout, recv)
            .await?
            .map_err(|e| AppError::Internal(format!("Completion actor dropped reply: {}", e)))?
    }
}

// --- Actor Runner (Internal Logic) ---
struct CompletionActorRunner {
    receiver: mpsc::Receiver<CompletionMessage>,
    client: Client,
    config: Arc<CompletionConfig>,
}

impl CompletionActorRunner {
    fn new(receiver: mpsc::Receiver<CompletionMessage>, config: CompletionConfig) -> Self {
        Self {
            receiver,
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    async fn run(mut self) {
        info!(model = %self.config.model, "CompletionActor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg);
        }

        info!("CompletionActor stopped");
    }

    /// Each request runs in its own task so a slow completion never holds up
    /// the mailbox.
    fn handle_message(&self, msg: CompletionMessage) {
        match msg {
            CompletionMessage::Complete {
                prompt,
                max_tokens,
                temperature,
                responder,
            } => {
                let client = self.client.clone();
                let config = Arc::clone(&self.config);
                tokio::spawn(async move {
                    let result =
                        request_completion(&client, &config, prompt, max_tokens, temperature).await;
                    if let Err(ref e) = result {
                        error!("Completion request failed: {}", e);
                    }
                    let _ = responder.send(result);
                });
            }
        }
    }
}

fn build_request(
    client: &Client,
    config: &CompletionConfig,
    payload: &serde_json::Value,
) -> reqwest::RequestBuilder {
    let request = client.post(config.endpoint()).json(payload);
    match &config.api_key {
        Some(key) => request.bearer_auth(key),
        None => request,
    }
}

async fn request_completion(
    client: &Client,
    config: &CompletionConfig,
    prompt: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
) -> Result<String, AppError> {
    debug!(prompt_len = prompt.len(), "Requesting completion");

    let payload = serde_json::json!({
        "model": config.model,
        "prompt": prompt,
        "max_tokens": max_tokens.unwrap_or(config.max_tokens),
        "temperature": temperature.unwrap_or(config.temperature),
    });

    let request_future = build_request(client, config, &payload).send();

    let res = timeout(config.timeout, request_future).await??;

    let status = res.status();

    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(AppError::Completion(format!(
            "Completion request failed with status {}: {}",
            status, body
        )));
    }

    let json: serde_json::Value = res.json().await?;

    json["choices"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AppError::Completion("Response has no choices[0].text".to_string()))
}
