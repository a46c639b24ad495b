use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

use crate::analysis::mood::{MoodFactor, MoodSample};
use crate::error::AppError;

fn default_emotion_intensity() -> u8 {
    50
}

/// A mood tracker entry as submitted by the user.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct MoodEntry {
    /// Mood rating, an integer between 1 and 5.
    #[validate(range(min = 1, max = 5))]
    pub mood: u8,
    /// Optional free-text notes about the mood.
    #[validate(length(max = 500))]
    #[serde(default)]
    pub notes: Option<String>,
    /// Factors that may have influenced the mood.
    #[serde(default)]
    pub factors: BTreeSet<MoodFactor>,
    /// When the mood was recorded.
    #[serde(default = "Utc::now")]
    pub recorded_at: DateTime<Utc>,
}

impl From<&MoodEntry> for MoodSample {
    fn from(entry: &MoodEntry) -> Self {
        MoodSample {
            mood: entry.mood,
            recorded_at: entry.recorded_at,
            factors: entry.factors.clone(),
        }
    }
}

/// A CBT thought diary entry.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ThoughtDiaryEntry {
    /// What happened.
    #[validate(length(min = 1))]
    pub situation: String,
    /// The automatic thoughts that came up.
    #[validate(length(min = 1))]
    pub thoughts: String,
    /// The emotions that were felt.
    #[validate(length(min = 1))]
    pub emotions: String,
    /// How strong the emotions were, 0 to 100.
    #[validate(range(min = 0, max = 100))]
    #[serde(default = "default_emotion_intensity")]
    pub emotion_intensity: u8,
    /// A more balanced view written by the user, if any.
    #[serde(default)]
    pub alternative_perspective: Option<String>,
}

/// Validates a batch of mood entries, reporting the first invalid one.
pub fn validate_mood_entries(entries: &[MoodEntry]) -> Result<(), AppError> {
    for (index, entry) in entries.iter().enumerate() {
        entry
            .validate()
            .map_err(|e| AppError::Validation(format!("Mood entry {}: {}", index, e)))?;
    }
    Ok(())
}

/// Converts validated mood entries into analysis samples.
pub fn mood_samples(entries: &[MoodEntry]) -> Vec<MoodSample> {
    entries.iter().map(MoodSample::from).collect()
}
