//! Lexicon-based sentiment scoring.
//!
//! Text is lowercased and split on anything that is not a letter, digit or
//! underscore. Stopwords are dropped, the remaining tokens are looked up in
//! the polarity lexicon and summed. The comparative score divides by the
//! token count *before* stopword removal.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::lexicon;

/// Coarse reading of a comparative sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentInterpretation {
    #[serde(rename = "very negative")]
    VeryNegative,
    #[serde(rename = "negative")]
    Negative,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "very positive")]
    VeryPositive,
}

impl SentimentInterpretation {
    /// Buckets a comparative score. Lower bounds are inclusive, so a value
    /// sitting exactly on a threshold lands in the higher bucket.
    pub fn from_comparative(comparative: f64) -> Self {
        if comparative < -0.5 {
            SentimentInterpretation::VeryNegative
        } else if comparative < -0.2 {
            SentimentInterpretation::Negative
        } else if comparative < 0.2 {
            SentimentInterpretation::Neutral
        } else if comparative < 0.5 {
            SentimentInterpretation::Positive
        } else {
            SentimentInterpretation::VeryPositive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SentimentInterpretation::VeryNegative => "very negative",
            SentimentInterpretation::Negative => "negative",
            SentimentInterpretation::Neutral => "neutral",
            SentimentInterpretation::Positive => "positive",
            SentimentInterpretation::VeryPositive => "very positive",
        }
    }
}

impl fmt::Display for SentimentInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of sentiment analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Sum of token polarities
    pub score: f64,
    /// Score divided by the unfiltered token count
    pub comparative: f64,
    /// Bucketed reading of `comparative`
    pub interpretation: SentimentInterpretation,
}

impl SentimentResult {
    /// The result for text with no tokens at all.
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            comparative: 0.0,
            interpretation: SentimentInterpretation::Neutral,
        }
    }
}

/// Sentiment scorer backed by the shared lexicon tables
#[derive(Debug, Clone, Copy)]
pub struct SentimentAnalyzer {
    stopwords: &'static HashSet<&'static str>,
    polarity: &'static HashMap<&'static str, i32>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            stopwords: lexicon::stopwords(),
            polarity: lexicon::polarity_index(),
        }
    }

    /// Split text into lowercase word tokens.
    pub fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Score a piece of text. Empty text scores zero.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return SentimentResult::neutral();
        }

        let score: i32 = tokens
            .iter()
            .filter(|token| !self.stopwords.contains(token.as_str()))
            .filter_map(|token| self.polarity.get(token.as_str()))
            .sum();

        let score = f64::from(score);
        let comparative = score / tokens.len() as f64;

        SentimentResult {
            score,
            comparative,
            interpretation: SentimentInterpretation::from_comparative(comparative),
        }
    }
}
