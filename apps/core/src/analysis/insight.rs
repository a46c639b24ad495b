//! Output records produced by the therapy analyzer.
//!
//! These are what the journaling layer stores alongside a diary entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::distortions::DistortionSet;
use super::sentiment::{SentimentInterpretation, SentimentResult};

/// Sentiment and distortions for a single piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextInsight {
    pub sentiment: SentimentResult,
    pub distortions: DistortionSet,
}

impl TextInsight {
    pub fn has_distortions(&self) -> bool {
        !self.distortions.is_empty()
    }
}

/// Analysis attached to a thought diary entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThoughtAnalysis {
    /// Raw sentiment score of the entry's thoughts
    pub sentiment_score: f64,
    pub interpretation: SentimentInterpretation,
    pub cognitive_distortions: DistortionSet,
    /// Reframing suggestions, never empty
    pub suggestions: Vec<String>,
    pub processed: bool,
    pub processing_time_ms: u64,
    pub analyzed_at: DateTime<Utc>,
}

impl ThoughtAnalysis {
    /// Get a summary for logging. Never includes the user's text.
    pub fn summary(&self) -> String {
        let distortions: Vec<&str> = self
            .cognitive_distortions
            .iter()
            .map(|d| d.label())
            .collect();
        format!(
            "Sentiment: {:.1} ({}), Distortions: [{}], Suggestions: {}",
            self.sentiment_score,
            self.interpretation,
            distortions.join(", "),
            self.suggestions.len()
        )
    }
}
