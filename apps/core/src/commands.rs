//! JSON command surface over the analyzer.
//!
//! A request is a JSON object tagged by `action`. Every response carries a
//! `success` flag; failures add a `message` and nothing else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};
use validator::Validate;

use crate::analysis::{ConversationTurn, TherapyAnalyzer};
use crate::error::AppError;
use crate::feedback::{FeedbackRecord, FeedbackStats};
use crate::models::{mood_samples, validate_mood_entries, MoodEntry, ThoughtDiaryEntry};

/// A single analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    AnalyzeSentiment {
        text: String,
    },
    DetectDistortions {
        text: String,
    },
    GenerateReframing {
        thought: String,
    },
    AnalyzeThought {
        entry: ThoughtDiaryEntry,
    },
    AnalyzeMood {
        entries: Vec<MoodEntry>,
    },
    MoodTrends {
        entries: Vec<MoodEntry>,
        start: DateTime<Utc>,
        #[serde(default)]
        end: Option<DateTime<Utc>>,
    },
    ShouldEscalate {
        history: Vec<ConversationTurn>,
    },
    FeedbackStats {
        records: Vec<FeedbackRecord>,
    },
    QuickAiFeedback {
        ai_response_id: String,
        helpful: bool,
    },
}

impl Request {
    pub fn action(&self) -> &'static str {
        match self {
            Request::AnalyzeSentiment { .. } => "analyze_sentiment",
            Request::DetectDistortions { .. } => "detect_distortions",
            Request::GenerateReframing { .. } => "generate_reframing",
            Request::AnalyzeThought { .. } => "analyze_thought",
            Request::AnalyzeMood { .. } => "analyze_mood",
            Request::MoodTrends { .. } => "mood_trends",
            Request::ShouldEscalate { .. } => "should_escalate",
            Request::FeedbackStats { .. } => "feedback_stats",
            Request::QuickAiFeedback { .. } => "quick_ai_feedback",
        }
    }
}

pub fn parse_request(raw: &str) -> Result<Request, AppError> {
    Ok(serde_json::from_str(raw)?)
}

/// Read raw request text from a file, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String, AppError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

/// Parse and handle a raw request; malformed JSON yields a failure response.
pub async fn handle_json(analyzer: &TherapyAnalyzer, raw: &str) -> Value {
    match parse_request(raw) {
        Ok(request) => handle_request(analyzer, request).await,
        Err(e) => {
            warn!("Rejected malformed request: {}", e);
            failure(&e)
        }
    }
}

pub async fn handle_request(analyzer: &TherapyAnalyzer, request: Request) -> Value {
    let action = request.action();
    info!(action, "Handling request");

    match dispatch(analyzer, request).await {
        Ok(response) => response,
        Err(e) => {
            warn!(action, "Request failed: {}", e);
            failure(&e)
        }
    }
}

async fn dispatch(analyzer: &TherapyAnalyzer, request: Request) -> Result<Value, AppError> {
    match request {
        Request::AnalyzeSentiment { text } => success("sentiment", analyzer.analyze_sentiment(&text)),
        Request::DetectDistortions { text } => {
            let evidence = analyzer.distortion_evidence(&text);
            let distortions: Vec<_> = evidence.keys().copied().collect();
            Ok(json!({
                "success": true,
                "distortions": distortions,
                "evidence": serde_json::to_value(&evidence)?,
            }))
        }
        Request::GenerateReframing { thought } => {
            if thought.trim().is_empty() {
                return Err(AppError::Validation("Thought must not be empty".to_string()));
            }
            success("suggestions", analyzer.generate_reframing(&thought).await)
        }
        Request::AnalyzeThought { entry } => {
            entry.validate()?;
            success("analysis", analyzer.analyze_thought(&entry).await)
        }
        Request::AnalyzeMood { entries } => {
            validate_mood_entries(&entries)?;
            success("insights", analyzer.analyze_mood(&mood_samples(&entries)))
        }
        Request::MoodTrends {
            entries,
            start,
            end,
        } => {
            validate_mood_entries(&entries)?;
            if matches!(end, Some(end) if end < start) {
                return Err(AppError::Validation(
                    "Trend range end must not precede start".to_string(),
                ));
            }
            success(
                "trends",
                analyzer.mood_trends(&mood_samples(&entries), start, end),
            )
        }
        Request::ShouldEscalate { history } => {
            success("escalation", analyzer.evaluate_escalation(&history))
        }
        Request::FeedbackStats { records } => {
            for (index, record) in records.iter().enumerate() {
                record
                    .validate()
                    .map_err(|e| AppError::Validation(format!("Feedback record {}: {}", index, e)))?;
            }
            success_fields(FeedbackStats::aggregate(&records))
        }
        Request::QuickAiFeedback {
            ai_response_id,
            helpful,
        } => {
            if ai_response_id.trim().is_empty() {
                return Err(AppError::Validation(
                    "AI response ID must not be empty".to_string(),
                ));
            }
            let feedback = FeedbackRecord::quick_ai(ai_response_id, helpful);
            Ok(json!({
                "success": true,
                "message": "Feedback submitted successfully",
                "feedbackId": feedback.id,
                "feedback": serde_json::to_value(&feedback)?,
            }))
        }
    }
}

fn success<T: Serialize>(key: &str, value: T) -> Result<Value, AppError> {
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(key.to_string(), serde_json::to_value(value)?);
    Ok(Value::Object(body))
}

/// Success response with the fields of `value` inlined.
fn success_fields<T: Serialize>(value: T) -> Result<Value, AppError> {
    let mut body = match serde_json::to_value(value)? {
        Value::Object(map) => map,
        other => {
            return Err(AppError::Internal(format!(
                "Expected an object response, got {}",
                other
            )))
        }
    };
    body.insert("success".to_string(), Value::Bool(true));
    Ok(Value::Object(body))
}

fn failure(err: &AppError) -> Value {
    json!({ "success": false, "message": err.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_tagged_request() {
        let request =
            parse_request(r#"{ "action": "analyze_sentiment", "text": "I am happy" }"#).unwrap();
        assert_eq!(request.action(), "analyze_sentiment");
        assert!(matches!(request, Request::AnalyzeSentiment { ref text } if text == "I am happy"));
    }

    #[test]
    fn test_parse_unknown_action() {
        let err = parse_request(r#"{ "action": "diagnose", "text": "x" }"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "action": "detect_distortions", "text": "I always fail" }}"#).unwrap();

        let raw = read_input(Some(file.path())).unwrap();
        let request = parse_request(&raw).unwrap();
        assert_eq!(request.action(), "detect_distortions");
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/request.json"))).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[tokio::test]
    async fn test_sentiment_response_shape() {
        let analyzer = TherapyAnalyzer::new();
        let response = handle_json(
            &analyzer,
            r#"{ "action": "analyze_sentiment", "text": "I am happy" }"#,
        )
        .await;

        assert_eq!(response["success"], true);
        assert_eq!(response["sentiment"]["score"], 3.0);
        assert_eq!(response["sentiment"]["interpretation"], "very positive");
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_failure_response() {
        let analyzer = TherapyAnalyzer::new();
        let response = handle_json(&analyzer, "{ not json").await;
        assert_eq!(response["success"], false);
        assert!(response["message"].as_str().unwrap().starts_with("Validation error"));
    }

    #[tokio::test]
    async fn test_invalid_mood_entry_is_rejected() {
        let analyzer = TherapyAnalyzer::new();
        let request = parse_request(
            r#"{ "action": "analyze_mood", "entries": [ { "mood": 3 }, { "mood": 7 } ] }"#,
        )
        .unwrap();

        let response = handle_request(&analyzer, request).await;
        assert_eq!(response["success"], false);
        assert!(response["message"].as_str().unwrap().contains("Mood entry 1"));
        assert!(response.get("insights").is_none());
    }

    #[tokio::test]
    async fn test_empty_reframing_thought_is_rejected() {
        let analyzer = TherapyAnalyzer::new();
        let response = handle_request(
            &analyzer,
            Request::GenerateReframing {
                thought: "   ".to_string(),
            },
        )
        .await;
        assert_eq!(response["success"], false);
    }

    #[tokio::test]
    async fn test_quick_feedback_response() {
        let analyzer = TherapyAnalyzer::new();
        let response = handle_request(
            &analyzer,
            Request::QuickAiFeedback {
                ai_response_id: "resp-42".to_string(),
                helpful: false,
            },
        )
        .await;

        assert_eq!(response["success"], true);
        assert_eq!(response["feedback"]["type"], "ai");
        assert_eq!(response["feedback"]["overall_rating"], 2);
        assert_eq!(response["feedback"]["ai_interaction_id"], "resp-42");
        assert_eq!(response["feedbackId"], response["feedback"]["id"]);
    }

    #[tokio::test]
    async fn test_feedback_stats_fields_are_inlined() {
        let analyzer = TherapyAnalyzer::new();
        let request = parse_request(
            r#"{ "action": "feedback_stats", "records": [
                { "type": "session", "overall_rating": 4, "would_recommend": "yes" },
                { "type": "session", "overall_rating": 2 }
            ] }"#,
        )
        .unwrap();

        let response = handle_request(&analyzer, request).await;
        assert_eq!(response["success"], true);
        assert_eq!(response["stats"][0]["type"], "session");
        assert_eq!(response["stats"][0]["avg_overall_rating"], 3.0);
        assert_eq!(response["recommendations"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_trend_range_must_be_ordered() {
        let analyzer = TherapyAnalyzer::new();
        let request = parse_request(
            r#"{ "action": "mood_trends", "entries": [],
                 "start": "2024-03-10T00:00:00Z", "end": "2024-03-01T00:00:00Z" }"#,
        )
        .unwrap();

        let response = handle_request(&analyzer, request).await;
        assert_eq!(response["success"], false);
    }
}
