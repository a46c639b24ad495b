//! # Analysis Module
//!
//! Rule-based, non-LLM analysis of what users write and record.
//! Every component is a pure function of its input and safe to share
//! across threads.
//!
//! ## Components
//! - `lexicon`: stopword and polarity tables
//! - `sentiment`: lexicon-based sentiment scoring
//! - `distortions`: cognitive distortion detection by phrase matching
//! - `escalation`: hand-off to a human therapist
//! - `mood`: mood pattern statistics and daily trends
//! - `reframing`: CBT reframing suggestions via an injected completion provider
//! - `insight`: output records
//! - `analyzer`: main orchestrator

pub mod analyzer;
pub mod distortions;
pub mod escalation;
pub mod insight;
pub mod lexicon;
pub mod mood;
pub mod reframing;
pub mod sentiment;

// Re-export main types for convenience
pub use analyzer::TherapyAnalyzer;
pub use distortions::{CognitiveDistortion, DistortionDetector, DistortionEvidence, DistortionSet};
pub use escalation::{
    ConversationTurn, EscalationDecision, EscalationEvaluator, EscalationReason, Role,
};
pub use insight::{TextInsight, ThoughtAnalysis};
pub use mood::{
    daily_mood_trends, DailyMoodTrend, MoodAnalyzer, MoodFactor, MoodPattern, MoodPatternResult,
    MoodSample, MoodTrend, VariabilityBand,
};
pub use reframing::ReframingGenerator;
pub use sentiment::{SentimentAnalyzer, SentimentInterpretation, SentimentResult};
