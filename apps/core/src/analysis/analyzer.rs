//! Therapy Analyzer - Main orchestrator for the analysis module.
//!
//! Bundles the sentiment scorer, distortion detector, escalation evaluator,
//! mood analyzer and reframing generator behind one value that can be shared
//! across requests.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::distortions::{DistortionDetector, DistortionEvidence, DistortionSet};
use super::escalation::{ConversationTurn, EscalationDecision, EscalationEvaluator};
use super::insight::{TextInsight, ThoughtAnalysis};
use super::mood::{daily_mood_trends, DailyMoodTrend, MoodAnalyzer, MoodPatternResult, MoodSample};
use super::reframing::ReframingGenerator;
use super::sentiment::{SentimentAnalyzer, SentimentResult};
use crate::actors::CompletionActorHandle;
use crate::config::AppConfig;
use crate::models::ThoughtDiaryEntry;

/// Main analyzer that orchestrates all analysis components
#[derive(Clone, Default)]
pub struct TherapyAnalyzer {
    sentiment: SentimentAnalyzer,
    distortions: DistortionDetector,
    escalation: EscalationEvaluator,
    mood: MoodAnalyzer,
    reframing: ReframingGenerator,
}

impl TherapyAnalyzer {
    /// Create an analyzer without a completion service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with a specific reframing generator
    pub fn with_reframing(reframing: ReframingGenerator) -> Self {
        Self {
            reframing,
            ..Self::default()
        }
    }

    /// Create an analyzer from configuration.
    ///
    /// Spawns the completion actor when an API key is configured, so this must
    /// run inside a Tokio runtime.
    pub fn from_config(config: &AppConfig) -> Self {
        if !config.completion.is_enabled() {
            info!("No completion API key configured, reframing uses fallback suggestions");
            return Self::new();
        }

        let handle = CompletionActorHandle::new(config.completion.clone());
        Self::with_reframing(ReframingGenerator::new(
            Arc::new(handle),
            config.completion.timeout,
        ))
    }

    pub fn reframing_online(&self) -> bool {
        self.reframing.is_online()
    }

    pub fn analyze_sentiment(&self, text: &str) -> SentimentResult {
        self.sentiment.analyze(text)
    }

    pub fn detect_distortions(&self, text: &str) -> DistortionSet {
        self.distortions.detect(text)
    }

    pub fn distortion_evidence(&self, text: &str) -> DistortionEvidence {
        self.distortions.detect_with_evidence(text)
    }

    /// Sentiment and distortions in one pass
    pub fn analyze_text(&self, text: &str) -> TextInsight {
        TextInsight {
            sentiment: self.sentiment.analyze(text),
            distortions: self.distortions.detect(text),
        }
    }

    pub fn evaluate_escalation(&self, history: &[ConversationTurn]) -> EscalationDecision {
        self.escalation.evaluate(history)
    }

    pub fn analyze_mood(&self, samples: &[MoodSample]) -> MoodPatternResult {
        self.mood.analyze(samples)
    }

    pub fn mood_trends(
        &self,
        samples: &[MoodSample],
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Vec<DailyMoodTrend> {
        daily_mood_trends(samples, start, end)
    }

    pub async fn generate_reframing(&self, thought: &str) -> Vec<String> {
        self.reframing.suggest(thought).await
    }

    /// Analyze a thought diary entry and produce the record stored with it
    pub async fn analyze_thought(&self, entry: &ThoughtDiaryEntry) -> ThoughtAnalysis {
        let start = Instant::now();

        let insight = self.analyze_text(&entry.thoughts);
        let suggestions = self.reframing.suggest(&entry.thoughts).await;

        let analysis = ThoughtAnalysis {
            sentiment_score: insight.sentiment.score,
            interpretation: insight.sentiment.interpretation,
            cognitive_distortions: insight.distortions,
            suggestions,
            processed: true,
            processing_time_ms: start.elapsed().as_millis() as u64,
            analyzed_at: Utc::now(),
        };

        info!("Thought diary analyzed: {}", analysis.summary());
        analysis
    }
}
