//! Mood pattern analysis over a user's mood history.
//!
//! Samples are taken in the order the caller supplies them, which is expected
//! to be oldest first. Statistics use the population standard deviation and
//! the trend compares the most recent window against the overall mean.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Samples required before any statistics are reported.
pub const MIN_SAMPLES: usize = 5;

/// Size of the trailing window used for the trend.
pub const RECENT_WINDOW: usize = 5;

const HIGH_VARIABILITY_THRESHOLD: f64 = 1.2;
const LOW_VARIABILITY_THRESHOLD: f64 = 0.5;
const TREND_THRESHOLD: f64 = 0.5;
const LOW_AVERAGE_THRESHOLD: f64 = 2.5;

const INSUFFICIENT_DATA_SUGGESTION: &str =
    "Continue tracking your mood daily to receive personalized insights.";

const HIGH_VARIABILITY_SUGGESTIONS: [&str; 3] = [
    "Your mood shows significant fluctuations. Consider tracking factors that might influence these changes.",
    "Mindfulness practices might help stabilize mood fluctuations.",
    "Discuss these mood patterns with your therapist to identify potential triggers.",
];

const LOW_VARIABILITY_SUGGESTIONS: [&str; 3] = [
    "Your mood appears relatively stable. This can be positive if you're feeling good consistently.",
    "If you're consistently feeling low, consider discussing this with your therapist.",
    "Try new activities that bring joy and note their impact on your mood.",
];

const IMPROVING_SUGGESTION: &str =
    "Your mood appears to be improving recently. Reflect on positive changes you've made.";
const DECLINING_SUGGESTION: &str =
    "Your mood appears to be declining recently. Consider discussing this with your therapist.";
const STABLE_SUGGESTION: &str = "Your mood has been relatively consistent recently.";
const LOW_AVERAGE_SUGGESTION: &str = "Your average mood is on the lower side. Consider scheduling a session with your therapist to discuss this.";

/// Things a user can tag as having influenced their mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodFactor {
    Sleep,
    Exercise,
    Nutrition,
    Social,
    Work,
    Family,
    Health,
    Weather,
    Other,
}

/// A single mood rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSample {
    /// Rating from 1 (lowest) to 5 (highest)
    pub mood: u8,
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub factors: BTreeSet<MoodFactor>,
}

impl MoodSample {
    pub fn new(mood: u8, recorded_at: DateTime<Utc>) -> Self {
        Self {
            mood,
            recorded_at,
            factors: BTreeSet::new(),
        }
    }
}

/// How much the mood moves around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariabilityBand {
    High,
    Low,
}

impl VariabilityBand {
    fn prefix(&self) -> &'static str {
        match self {
            VariabilityBand::High => "high_variability",
            VariabilityBand::Low => "low_variability",
        }
    }
}

/// Direction of the recent window relative to the overall mean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodTrend {
    Improving,
    Declining,
    Stable,
}

impl MoodTrend {
    fn suffix(&self) -> &'static str {
        match self {
            MoodTrend::Improving => "_improving",
            MoodTrend::Declining => "_declining",
            MoodTrend::Stable => "_stable",
        }
    }
}

/// Composite pattern label, e.g. `high_variability_declining` or `_stable`.
///
/// Moderate variability carries no prefix, which is why a bare `_stable`
/// is a valid label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MoodPattern {
    InsufficientData,
    Observed {
        variability: Option<VariabilityBand>,
        trend: MoodTrend,
    },
}

impl MoodPattern {
    pub fn label(&self) -> String {
        match self {
            MoodPattern::InsufficientData => "insufficient_data".to_string(),
            MoodPattern::Observed { variability, trend } => format!(
                "{}{}",
                variability.map(|v| v.prefix()).unwrap_or(""),
                trend.suffix()
            ),
        }
    }
}

impl fmt::Display for MoodPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<MoodPattern> for String {
    fn from(pattern: MoodPattern) -> Self {
        pattern.label()
    }
}

impl FromStr for MoodPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "insufficient_data" {
            return Ok(MoodPattern::InsufficientData);
        }

        let (prefix, trend) = [MoodTrend::Improving, MoodTrend::Declining, MoodTrend::Stable]
            .into_iter()
            .find_map(|t| s.strip_suffix(t.suffix()).map(|p| (p, t)))
            .ok_or_else(|| format!("Unknown mood pattern: {}", s))?;

        let variability = match prefix {
            "" => None,
            "high_variability" => Some(VariabilityBand::High),
            "low_variability" => Some(VariabilityBand::Low),
            other => return Err(format!("Unknown variability band: {}", other)),
        };

        Ok(MoodPattern::Observed { variability, trend })
    }
}

impl TryFrom<String> for MoodPattern {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Result of mood pattern analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodPatternResult {
    pub pattern: MoodPattern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_mood: Option<f64>,
    /// Population standard deviation of all ratings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_variability: Option<f64>,
    /// Recent-window mean minus overall mean
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<f64>,
    pub suggestions: Vec<String>,
}

/// Average mood for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMoodTrend {
    pub date: NaiveDate,
    pub average_mood: f64,
    pub count: usize,
}

/// Mood pattern analyzer
#[derive(Debug, Clone, Copy)]
pub struct MoodAnalyzer {
    min_samples: usize,
    recent_window: usize,
}

impl Default for MoodAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodAnalyzer {
    pub fn new() -> Self {
        Self::with_config(MIN_SAMPLES, RECENT_WINDOW)
    }

    /// Create an analyzer with a custom sample floor and trend window.
    /// Both are clamped to at least one sample.
    pub(crate) fn with_config(min_samples: usize, recent_window: usize) -> Self {
        Self {
            min_samples: min_samples.max(1),
            recent_window: recent_window.max(1),
        }
    }

    /// Analyze a time-ordered mood history.
    pub fn analyze(&self, samples: &[MoodSample]) -> MoodPatternResult {
        let ratings: Vec<f64> = samples.iter().map(|s| f64::from(s.mood)).collect();
        self.analyze_ratings(&ratings)
    }

    /// Analyze bare ratings, oldest first.
    pub fn analyze_ratings(&self, ratings: &[f64]) -> MoodPatternResult {
        if ratings.len() < self.min_samples {
            debug!(
                samples = ratings.len(),
                required = self.min_samples,
                "Not enough mood data for pattern analysis"
            );
            return MoodPatternResult {
                pattern: MoodPattern::InsufficientData,
                average_mood: None,
                mood_variability: None,
                trend: None,
                suggestions: vec![INSUFFICIENT_DATA_SUGGESTION.to_string()],
            };
        }

        let average_mood = mean(ratings);
        let mood_variability = population_std_dev(ratings, average_mood);
        let recent = &ratings[ratings.len().saturating_sub(self.recent_window)..];
        let trend = mean(recent) - average_mood;

        let mut suggestions: Vec<String> = Vec::new();

        let variability = if mood_variability > HIGH_VARIABILITY_THRESHOLD {
            suggestions.extend(HIGH_VARIABILITY_SUGGESTIONS.iter().map(|s| s.to_string()));
            Some(VariabilityBand::High)
        } else if mood_variability < LOW_VARIABILITY_THRESHOLD {
            suggestions.extend(LOW_VARIABILITY_SUGGESTIONS.iter().map(|s| s.to_string()));
            Some(VariabilityBand::Low)
        } else {
            None
        };

        let direction = if trend > TREND_THRESHOLD {
            suggestions.push(IMPROVING_SUGGESTION.to_string());
            MoodTrend::Improving
        } else if trend < -TREND_THRESHOLD {
            suggestions.push(DECLINING_SUGGESTION.to_string());
            MoodTrend::Declining
        } else {
            suggestions.push(STABLE_SUGGESTION.to_string());
            MoodTrend::Stable
        };

        if average_mood < LOW_AVERAGE_THRESHOLD {
            suggestions.push(LOW_AVERAGE_SUGGESTION.to_string());
        }

        MoodPatternResult {
            pattern: MoodPattern::Observed {
                variability,
                trend: direction,
            },
            average_mood: Some(average_mood),
            mood_variability: Some(mood_variability),
            trend: Some(trend),
            suggestions,
        }
    }
}

/// Group samples in `[start, end]` by UTC calendar day.
///
/// `end` defaults to now. Days are returned oldest first.
pub fn daily_mood_trends(
    samples: &[MoodSample],
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Vec<DailyMoodTrend> {
    let end = end.unwrap_or_else(Utc::now);
    let mut days: BTreeMap<NaiveDate, (u32, usize)> = BTreeMap::new();

    for sample in samples
        .iter()
        .filter(|s| s.recorded_at >= start && s.recorded_at <= end)
    {
        let entry = days.entry(sample.recorded_at.date_naive()).or_insert((0, 0));
        entry.0 += u32::from(sample.mood);
        entry.1 += 1;
    }

    days.into_iter()
        .map(|(date, (sum, count))| DailyMoodTrend {
            date,
            average_mood: f64::from(sum) / count as f64,
            count,
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
