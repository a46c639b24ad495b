//! Feedback records and the statistics built from them.
//!
//! Averages skip ratings that were not given. A group with no ratings of a
//! kind reports `None` for that average rather than zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

/// Rating used for a "helpful" quick reaction to an AI response.
pub const QUICK_HELPFUL_RATING: u8 = 5;
/// Rating used for an "unhelpful" quick reaction to an AI response.
pub const QUICK_UNHELPFUL_RATING: u8 = 2;

/// What the feedback is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    General,
    Session,
    Ai,
    Feature,
}

/// Answer to "would you recommend us?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Yes,
    Maybe,
    No,
}

/// A single piece of user feedback.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: FeedbackType,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[validate(range(min = 0, max = 5))]
    pub overall_rating: u8,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub ai_interaction_id: Option<String>,
    #[serde(default)]
    pub feature_name: Option<String>,
    #[validate(range(min = 0, max = 5))]
    #[serde(default)]
    pub empathy_rating: Option<u8>,
    #[validate(range(min = 0, max = 5))]
    #[serde(default)]
    pub helpfulness_rating: Option<u8>,
    #[validate(range(min = 0, max = 5))]
    #[serde(default)]
    pub usability_rating: Option<u8>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub improvement: Option<String>,
    #[serde(default)]
    pub would_recommend: Option<Recommendation>,
}

impl FeedbackRecord {
    /// Feedback from a thumbs-up / thumbs-down on an AI response.
    pub fn quick_ai(ai_response_id: impl Into<String>, helpful: bool) -> Self {
        let rating = if helpful {
            QUICK_HELPFUL_RATING
        } else {
            QUICK_UNHELPFUL_RATING
        };

        Self {
            id: Uuid::new_v4(),
            kind: FeedbackType::Ai,
            timestamp: Utc::now(),
            overall_rating: rating,
            session_id: None,
            ai_interaction_id: Some(ai_response_id.into()),
            feature_name: None,
            empathy_rating: None,
            helpfulness_rating: Some(rating),
            usability_rating: None,
            comments: None,
            improvement: None,
            would_recommend: None,
        }
    }
}

/// Running mean that ignores missing values.
#[derive(Debug, Default, Clone, Copy)]
struct RatingAverage {
    sum: f64,
    count: usize,
}

impl RatingAverage {
    fn push(&mut self, rating: Option<u8>) {
        if let Some(r) = rating {
            self.sum += f64::from(r);
            self.count += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct TypeAccumulator {
    count: usize,
    overall: RatingAverage,
    empathy: RatingAverage,
    helpfulness: RatingAverage,
    usability: RatingAverage,
}

/// Aggregate ratings for one feedback type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackTypeStats {
    #[serde(rename = "type")]
    pub kind: FeedbackType,
    pub count: usize,
    pub avg_overall_rating: Option<f64>,
    pub avg_empathy_rating: Option<f64>,
    pub avg_helpfulness_rating: Option<f64>,
    pub avg_usability_rating: Option<f64>,
}

/// How many records gave a particular recommendation answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationCount {
    /// `None` groups records that did not answer.
    pub would_recommend: Option<Recommendation>,
    pub count: usize,
}

/// Feedback statistics for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub stats: Vec<FeedbackTypeStats>,
    pub recommendations: Vec<RecommendationCount>,
}

impl FeedbackStats {
    /// Group records by type and by recommendation answer.
    pub fn aggregate(records: &[FeedbackRecord]) -> Self {
        let mut by_type: BTreeMap<FeedbackType, TypeAccumulator> = BTreeMap::new();
        let mut by_recommendation: BTreeMap<Option<Recommendation>, usize> = BTreeMap::new();

        for record in records {
            let acc = by_type.entry(record.kind).or_default();
            acc.count += 1;
            acc.overall.push(Some(record.overall_rating));
            acc.empathy.push(record.empathy_rating);
            acc.helpfulness.push(record.helpfulness_rating);
            acc.usability.push(record.usability_rating);

            *by_recommendation.entry(record.would_recommend).or_insert(0) += 1;
        }

        let stats = by_type
            .into_iter()
            .map(|(kind, acc)| FeedbackTypeStats {
                kind,
                count: acc.count,
                avg_overall_rating: acc.overall.value(),
                avg_empathy_rating: acc.empathy.value(),
                avg_helpfulness_rating: acc.helpfulness.value(),
                avg_usability_rating: acc.usability.value(),
            })
            .collect();

        let recommendations = by_recommendation
            .into_iter()
            .map(|(would_recommend, count)| RecommendationCount {
                would_recommend,
                count,
            })
            .collect();

        Self {
            stats,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: FeedbackType, overall: u8) -> FeedbackRecord {
        FeedbackRecord {
            kind,
            overall_rating: overall,
            ai_interaction_id: None,
            helpfulness_rating: None,
            ..FeedbackRecord::quick_ai("unused", true)
        }
    }

    #[test]
    fn test_quick_ai_feedback_ratings() {
        let helpful = FeedbackRecord::quick_ai("resp-1", true);
        assert_eq!(helpful.kind, FeedbackType::Ai);
        assert_eq!(helpful.overall_rating, 5);
        assert_eq!(helpful.helpfulness_rating, Some(5));
        assert_eq!(helpful.ai_interaction_id.as_deref(), Some("resp-1"));

        let unhelpful = FeedbackRecord::quick_ai("resp-2", false);
        assert_eq!(unhelpful.overall_rating, 2);
        assert_eq!(unhelpful.helpfulness_rating, Some(2));
        assert_ne!(helpful.id, unhelpful.id);
    }

    #[test]
    fn test_empty_input() {
        let stats = FeedbackStats::aggregate(&[]);
        assert!(stats.stats.is_empty());
        assert!(stats.recommendations.is_empty());
    }

    #[test]
    fn test_averages_ignore_missing_ratings() {
        let mut a = record(FeedbackType::Session, 4);
        a.empathy_rating = Some(5);
        let mut b = record(FeedbackType::Session, 2);
        b.empathy_rating = None;
        b.would_recommend = Some(Recommendation::Yes);

        let stats = FeedbackStats::aggregate(&[a, b]);

        assert_eq!(stats.stats.len(), 1);
        let session = &stats.stats[0];
        assert_eq!(session.kind, FeedbackType::Session);
        assert_eq!(session.count, 2);
        assert_eq!(session.avg_overall_rating, Some(3.0));
        assert_eq!(session.avg_empathy_rating, Some(5.0));
        assert_eq!(session.avg_usability_rating, None);
    }

    #[test]
    fn test_groups_ordered_by_type_and_recommendation() {
        let mut yes = record(FeedbackType::Feature, 5);
        yes.would_recommend = Some(Recommendation::Yes);
        let mut no = record(FeedbackType::General, 1);
        no.would_recommend = Some(Recommendation::No);
        let quick = FeedbackRecord::quick_ai("resp", true);

        let stats = FeedbackStats::aggregate(&[yes, no, quick]);

        let kinds: Vec<FeedbackType> = stats.stats.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![FeedbackType::General, FeedbackType::Ai, FeedbackType::Feature]
        );

        assert_eq!(
            stats.recommendations,
            vec![
                RecommendationCount { would_recommend: None, count: 1 },
                RecommendationCount { would_recommend: Some(Recommendation::Yes), count: 1 },
                RecommendationCount { would_recommend: Some(Recommendation::No), count: 1 },
            ]
        );
    }

    #[test]
    fn test_record_deserializes_from_api_shape() {
        let record: FeedbackRecord = serde_json::from_str(
            r#"{ "type": "session", "overall_rating": 4, "would_recommend": "maybe" }"#,
        )
        .unwrap();
        assert_eq!(record.kind, FeedbackType::Session);
        assert_eq!(record.would_recommend, Some(Recommendation::Maybe));
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_rating_is_invalid() {
        let mut r = record(FeedbackType::General, 6);
        assert!(r.validate().is_err());
        r.overall_rating = 5;
        r.usability_rating = Some(9);
        assert!(r.validate().is_err());
    }
}
