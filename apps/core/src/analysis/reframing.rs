//! CBT reframing suggestions for negative thoughts.
//!
//! Suggestions come from an injected [`CompletionProvider`]. The generator
//! never fails: a missing provider, an error, a timeout or an unparseable
//! completion all yield the fixed fallback list.

use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::actors::traits::CompletionProvider;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 3;

/// Used whenever the completion service cannot produce suggestions.
pub const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "Consider whether this thought is based on facts or assumptions.",
    "How would you advise a friend who had this thought?",
    "Is there another way to interpret this situation?",
];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// NOTE: expect() is acceptable here, the pattern is a constant
static NUMBERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.").expect("Invalid regex: numbered list marker"));

/// Produces reframing suggestions through an optional completion capability
#[derive(Clone)]
pub struct ReframingGenerator {
    provider: Option<Arc<dyn CompletionProvider>>,
    timeout: Duration,
}

impl Default for ReframingGenerator {
    fn default() -> Self {
        Self::offline()
    }
}

impl ReframingGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            timeout,
        }
    }

    /// A generator without a completion service; always returns the fallback.
    pub fn offline() -> Self {
        Self {
            provider: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn is_online(&self) -> bool {
        self.provider.is_some()
    }

    pub fn fallback() -> Vec<String> {
        FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
    }

    /// Prompt sent to the completion service.
    pub fn build_prompt(thought: &str) -> String {
        format!(
            "The following is a negative thought from a thought diary. Please provide 3 alternative, \
             more balanced perspectives that could help reframe this thought in a CBT (Cognitive \
             Behavioral Therapy) context. Keep the suggestions compassionate and non-dismissive of \
             the person's feelings.\n\nNegative thought: \"{}\"\n\nReframing suggestions:",
            thought
        )
    }

    /// Split a numbered completion ("1. ... 2. ...") into trimmed suggestions.
    pub fn parse_suggestions(completion: &str) -> Vec<String> {
        NUMBERED_MARKER
            .split(completion)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(MAX_SUGGESTIONS)
            .map(str::to_string)
            .collect()
    }

    /// Suggest balanced alternatives to `thought`.
    pub async fn suggest(&self, thought: &str) -> Vec<String> {
        let Some(provider) = &self.provider else {
            debug!("No completion provider configured, using fallback suggestions");
            return Self::fallback();
        };

        let prompt = Self::build_prompt(thought);
        match timeout(self.timeout, provider.complete(prompt)).await {
            Ok(Ok(completion)) => {
                let suggestions = Self::parse_suggestions(&completion);
                if suggestions.is_empty() {
                    warn!("Completion contained no suggestions, using fallback");
                    Self::fallback()
                } else {
                    suggestions
                }
            }
            Ok(Err(e)) => {
                warn!("Error generating reframing suggestions: {}", e);
                Self::fallback()
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "Reframing suggestions timed out");
                Self::fallback()
            }
        }
    }
}
