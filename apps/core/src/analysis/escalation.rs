//! Hand-off from automated conversation to a human therapist.
//!
//! Only the trailing user turns are considered. Three triggers run in a fixed
//! order and the first one that fires decides the outcome:
//! crisis phrases, then severe negative sentiment, then repeated
//! dissatisfaction with the assistant.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use super::sentiment::SentimentAnalyzer;

/// Number of trailing user turns inspected.
pub const RECENT_USER_TURNS: usize = 3;

/// Raw sentiment score below which a conversation is escalated.
pub const SEVERE_SENTIMENT_THRESHOLD: f64 = -0.7;

/// Distinct dissatisfaction phrases needed to escalate.
pub const DISSATISFACTION_THRESHOLD: usize = 2;

const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "don't want to live",
    "hurt myself",
    "self-harm",
    "cutting myself",
    "overdose",
    "emergency",
    "crisis",
    "dangerous",
    "immediate help",
];

const DISSATISFACTION_PHRASES: &[&str] = &[
    "you don't understand",
    "not helping",
    "useless",
    "want to talk to a real person",
    "want a human",
    "need a therapist",
];

const CRISIS_MESSAGE: &str = "I notice you mentioned something concerning. I think it would be best to connect you with a human therapist right away.";
const SEVERE_SENTIMENT_MESSAGE: &str = "I can see you're going through a difficult time. Would you like to speak with a human therapist who might be better able to help?";
const DISSATISFACTION_MESSAGE: &str = "I understand I might not be meeting your needs right now. Would you prefer to speak with a human therapist?";

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in an AI conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Why a conversation was (or was not) escalated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationReason {
    None,
    CrisisDetected,
    SevereNegativeSentiment,
    UserDissatisfaction,
}

impl EscalationReason {
    pub fn label(&self) -> &'static str {
        match self {
            EscalationReason::None => "none",
            EscalationReason::CrisisDetected => "crisis_detected",
            EscalationReason::SevereNegativeSentiment => "severe_negative_sentiment",
            EscalationReason::UserDissatisfaction => "user_dissatisfaction",
        }
    }
}

impl fmt::Display for EscalationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outcome of an escalation check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationDecision {
    pub escalate: bool,
    pub reason: EscalationReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EscalationDecision {
    /// Stay with the automated assistant.
    pub fn stay() -> Self {
        Self {
            escalate: false,
            reason: EscalationReason::None,
            message: None,
        }
    }

    fn escalate(reason: EscalationReason, message: &str) -> Self {
        Self {
            escalate: true,
            reason,
            message: Some(message.to_string()),
        }
    }
}

/// Decides when a conversation needs a human therapist
#[derive(Debug, Clone, Copy, Default)]
pub struct EscalationEvaluator {
    sentiment: SentimentAnalyzer,
}

impl EscalationEvaluator {
    pub fn new() -> Self {
        Self {
            sentiment: SentimentAnalyzer::new(),
        }
    }

    /// Join the last few user turns, oldest first, with single spaces.
    pub fn recent_user_text(history: &[ConversationTurn]) -> String {
        let mut recent: Vec<&str> = history
            .iter()
            .rev()
            .filter(|turn| turn.role == Role::User)
            .take(RECENT_USER_TURNS)
            .map(|turn| turn.content.as_str())
            .collect();
        recent.reverse();
        recent.join(" ")
    }

    /// Evaluate the trailing window of a conversation.
    pub fn evaluate(&self, history: &[ConversationTurn]) -> EscalationDecision {
        if history.is_empty() {
            return EscalationDecision::stay();
        }

        let combined = Self::recent_user_text(history);
        let lower = combined.to_lowercase();

        if let Some(phrase) = CRISIS_PHRASES.iter().find(|p| lower.contains(*p)) {
            warn!(trigger = "crisis", phrase = %phrase, "Escalating conversation to a human therapist");
            return EscalationDecision::escalate(EscalationReason::CrisisDetected, CRISIS_MESSAGE);
        }

        let sentiment = self.sentiment.analyze(&combined);
        if sentiment.score < SEVERE_SENTIMENT_THRESHOLD {
            warn!(
                trigger = "sentiment",
                score = sentiment.score,
                "Escalating conversation to a human therapist"
            );
            return EscalationDecision::escalate(
                EscalationReason::SevereNegativeSentiment,
                SEVERE_SENTIMENT_MESSAGE,
            );
        }

        let dissatisfaction = DISSATISFACTION_PHRASES
            .iter()
            .filter(|p| lower.contains(*p))
            .count();
        if dissatisfaction >= DISSATISFACTION_THRESHOLD {
            warn!(
                trigger = "dissatisfaction",
                count = dissatisfaction,
                "Escalating conversation to a human therapist"
            );
            return EscalationDecision::escalate(
                EscalationReason::UserDissatisfaction,
                DISSATISFACTION_MESSAGE,
            );
        }

        debug!(
            score = sentiment.score,
            dissatisfaction, "No escalation trigger fired"
        );
        EscalationDecision::stay()
    }
}
