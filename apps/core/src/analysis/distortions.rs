//! Cognitive distortion detection.
//!
//! Each category owns a list of trigger phrases. Matching is plain substring
//! containment on the lowercased text, so "should" also fires inside
//! "shoulder". Categories are evaluated independently; a phrase listed under
//! two categories emits both.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The closed vocabulary of distortion categories.
///
/// Declaration order is the order results are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveDistortion {
    AllOrNothing,
    Overgeneralization,
    MentalFilter,
    DisqualifyingPositive,
    JumpingToConclusions,
    Magnification,
    EmotionalReasoning,
    ShouldStatements,
    Labeling,
    Personalization,
}

impl CognitiveDistortion {
    pub const ALL: [CognitiveDistortion; 10] = [
        CognitiveDistortion::AllOrNothing,
        CognitiveDistortion::Overgeneralization,
        CognitiveDistortion::MentalFilter,
        CognitiveDistortion::DisqualifyingPositive,
        CognitiveDistortion::JumpingToConclusions,
        CognitiveDistortion::Magnification,
        CognitiveDistortion::EmotionalReasoning,
        CognitiveDistortion::ShouldStatements,
        CognitiveDistortion::Labeling,
        CognitiveDistortion::Personalization,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CognitiveDistortion::AllOrNothing => "all_or_nothing",
            CognitiveDistortion::Overgeneralization => "overgeneralization",
            CognitiveDistortion::MentalFilter => "mental_filter",
            CognitiveDistortion::DisqualifyingPositive => "disqualifying_positive",
            CognitiveDistortion::JumpingToConclusions => "jumping_to_conclusions",
            CognitiveDistortion::Magnification => "magnification",
            CognitiveDistortion::EmotionalReasoning => "emotional_reasoning",
            CognitiveDistortion::ShouldStatements => "should_statements",
            CognitiveDistortion::Labeling => "labeling",
            CognitiveDistortion::Personalization => "personalization",
        }
    }

    /// Trigger phrases, all lowercase.
    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            CognitiveDistortion::AllOrNothing => &[
                "always",
                "never",
                "everything",
                "nothing",
                "everyone",
                "nobody",
                "completely",
                "totally",
            ],
            CognitiveDistortion::Overgeneralization => &[
                "every time",
                "all the time",
                "constantly",
                "everyone",
                "no one",
                "everything",
            ],
            CognitiveDistortion::MentalFilter => &[
                "terrible",
                "horrible",
                "awful",
                "worst",
                "disaster",
                "catastrophe",
            ],
            CognitiveDistortion::DisqualifyingPositive => &[
                "doesn't count",
                "doesn't matter",
                "not important",
                "yeah but",
                "that's not the point",
            ],
            CognitiveDistortion::JumpingToConclusions => &[
                "must be thinking",
                "must be feeling",
                "knows that",
                "i know they",
                "they think",
                "they know",
            ],
            CognitiveDistortion::Magnification => &[
                "disaster",
                "horrible",
                "terrible",
                "unbearable",
                "can't stand",
                "can't handle",
            ],
            CognitiveDistortion::EmotionalReasoning => {
                &["i feel", "i don't feel", "it feels like", "because i feel"]
            }
            CognitiveDistortion::ShouldStatements => {
                &["should", "must", "have to", "ought to", "supposed to"]
            }
            CognitiveDistortion::Labeling => &[
                "i'm a",
                "they're a",
                "he's a",
                "she's a",
                "i am",
                "they are",
                "loser",
                "failure",
                "idiot",
            ],
            CognitiveDistortion::Personalization => &[
                "my fault",
                "because of me",
                "my responsibility",
                "i caused",
                "i'm to blame",
            ],
        }
    }
}

impl fmt::Display for CognitiveDistortion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Detected categories, iterated in declaration order.
pub type DistortionSet = BTreeSet<CognitiveDistortion>;

/// Each detected category with the phrase that triggered it.
pub type DistortionEvidence = BTreeMap<CognitiveDistortion, &'static str>;

/// Substring-based distortion detector
#[derive(Debug, Clone, Copy, Default)]
pub struct DistortionDetector;

impl DistortionDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect every category with at least one phrase present in `text`.
    pub fn detect(&self, text: &str) -> DistortionSet {
        if text.is_empty() {
            return DistortionSet::new();
        }

        let lower = text.to_lowercase();

        CognitiveDistortion::ALL
            .iter()
            .copied()
            .filter(|category| category.phrases().iter().any(|p| lower.contains(p)))
            .collect()
    }

    /// The first phrase that triggered `category`, if any. Useful for
    /// explaining a detection to a therapist.
    pub fn evidence(&self, text: &str, category: CognitiveDistortion) -> Option<&'static str> {
        let lower = text.to_lowercase();
        category
            .phrases()
            .iter()
            .copied()
            .find(|p| lower.contains(p))
    }

    /// Detected categories paired with their first triggering phrase.
    /// The keys are exactly the categories [`detect`](Self::detect) reports.
    pub fn detect_with_evidence(&self, text: &str) -> DistortionEvidence {
        CognitiveDistortion::ALL
            .iter()
            .filter_map(|category| {
                self.evidence(text, *category)
                    .map(|phrase| (*category, phrase))
            })
            .collect()
    }
}
