//! Analysis Tests
//!
//! Behavioral properties of the rule-based analyzers.

use crate::analysis::{
    CognitiveDistortion, ConversationTurn, DistortionDetector, EscalationEvaluator,
    EscalationReason, MoodAnalyzer, MoodPattern, MoodSample, MoodTrend, SentimentAnalyzer,
    SentimentInterpretation, TherapyAnalyzer, VariabilityBand,
};
use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

// ============================================================================
// Fixtures
// ============================================================================

const SAMPLE_TEXTS: &[&str] = &[
    "",
    "I am happy",
    "I feel hopeless and sad about work",
    "Everything is a disaster and I'm a failure",
    "Thank you, that was fine",
    "I'm so tired of this, nothing ever works and it's all my fault",
    "The weather is calm today",
];

fn samples(moods: &[u8]) -> Vec<MoodSample> {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    moods
        .iter()
        .enumerate()
        .map(|(i, m)| MoodSample::new(*m, base + Duration::days(i as i64)))
        .collect()
}

// ============================================================================
// Sentiment
// ============================================================================

#[test]
fn test_empty_text_is_neutral() {
    let result = SentimentAnalyzer::new().analyze("");
    assert_eq!(result.score, 0.0);
    assert_eq!(result.comparative, 0.0);
    assert_eq!(result.interpretation, SentimentInterpretation::Neutral);
}

#[test]
fn test_interpretation_follows_comparative() {
    let analyzer = SentimentAnalyzer::new();
    for text in SAMPLE_TEXTS {
        let result = analyzer.analyze(text);
        assert_eq!(
            result.interpretation,
            SentimentInterpretation::from_comparative(result.comparative),
            "interpretation mismatch for {:?}",
            text
        );
    }
}

#[test]
fn test_sentiment_ignores_case() {
    let analyzer = SentimentAnalyzer::new();
    assert_eq!(analyzer.analyze("I AM HAPPY"), analyzer.analyze("i am happy"));
}

// ============================================================================
// Distortions
// ============================================================================

#[test]
fn test_detection_is_monotonic() {
    let detector = DistortionDetector::new();
    let suffixes = [" and the bus was late", " 12345", " The cat sat on the mat."];

    for text in SAMPLE_TEXTS {
        let base = detector.detect(text);
        for suffix in suffixes {
            let extended = detector.detect(&format!("{}{}", text, suffix));
            assert!(
                base.is_subset(&extended),
                "appending {:?} to {:?} removed a category",
                suffix,
                text
            );
        }
    }
}

#[test]
fn test_detection_matches_uppercase_phrases() {
    let found = DistortionDetector::new().detect("I FEEL like I SHOULD quit");
    assert!(found.contains(&CognitiveDistortion::EmotionalReasoning));
    assert!(found.contains(&CognitiveDistortion::ShouldStatements));
}

#[test]
fn test_neutral_text_has_no_distortions() {
    assert!(DistortionDetector::new()
        .detect("The weather is calm today")
        .is_empty());
}

// ============================================================================
// Escalation
// ============================================================================

#[test]
fn test_crisis_wins_over_positive_sentiment() {
    let history = vec![
        ConversationTurn::user("I had a good day"),
        ConversationTurn::assistant("That's great to hear."),
        ConversationTurn::user("I love my friends, great family, good job, but I want to kill myself"),
    ];
    let decision = EscalationEvaluator::new().evaluate(&history);

    assert!(decision.escalate);
    assert_eq!(decision.reason, EscalationReason::CrisisDetected);
    assert!(decision.message.is_some());
}

#[test]
fn test_repeated_dissatisfaction_escalates() {
    let history = vec![
        ConversationTurn::user("You don't understand"),
        ConversationTurn::assistant("Can you tell me more?"),
        ConversationTurn::user("I want a human"),
        ConversationTurn::assistant("I hear you."),
        ConversationTurn::user("Please"),
    ];
    let decision = EscalationEvaluator::new().evaluate(&history);

    assert!(decision.escalate);
    assert_eq!(decision.reason, EscalationReason::UserDissatisfaction);
}

#[test]
fn test_severe_sentiment_wins_over_dissatisfaction() {
    // Two dissatisfaction phrases, but "useless" also drives the score below -0.7.
    let history = vec![ConversationTurn::user("this is useless and not helping")];
    let decision = EscalationEvaluator::new().evaluate(&history);

    assert!(decision.escalate);
    assert_eq!(decision.reason, EscalationReason::SevereNegativeSentiment);
}

#[test]
fn test_crisis_wins_over_dissatisfaction() {
    let history = vec![
        ConversationTurn::user("You don't understand"),
        ConversationTurn::user("I want a human"),
        ConversationTurn::user("I need immediate help"),
    ];
    let decision = EscalationEvaluator::new().evaluate(&history);

    assert!(decision.escalate);
    assert_eq!(decision.reason, EscalationReason::CrisisDetected);
}

#[test]
fn test_single_dissatisfaction_phrase_stays() {
    let history = vec![ConversationTurn::user("You don't understand")];
    let decision = EscalationEvaluator::new().evaluate(&history);

    assert!(!decision.escalate);
    assert_eq!(decision.reason, EscalationReason::None);
    assert!(decision.message.is_none());
}

#[test]
fn test_old_user_turns_fall_out_of_window() {
    let history = vec![
        ConversationTurn::user("I might hurt myself"),
        ConversationTurn::user("Actually I talked to my sister"),
        ConversationTurn::user("We went for a walk"),
        ConversationTurn::user("It was calm"),
    ];
    let decision = EscalationEvaluator::new().evaluate(&history);
    assert_eq!(decision.reason, EscalationReason::None);
}

#[test]
fn test_assistant_text_is_ignored() {
    let history = vec![
        ConversationTurn::assistant("If you are in crisis, call emergency services."),
        ConversationTurn::user("Thanks"),
    ];
    assert!(!EscalationEvaluator::new().evaluate(&history).escalate);
}

// ============================================================================
// Mood
// ============================================================================

#[test]
fn test_four_samples_are_insufficient() {
    let result = MoodAnalyzer::new().analyze(&samples(&[3, 4, 2, 5]));

    assert_eq!(result.pattern, MoodPattern::InsufficientData);
    assert!(result.average_mood.is_none());
    assert_eq!(result.suggestions.len(), 1);
}

#[test]
fn test_constant_mood_is_stable() {
    let result = MoodAnalyzer::new().analyze(&samples(&[3, 3, 3, 3, 3]));

    assert_eq!(result.average_mood, Some(3.0));
    assert_eq!(result.mood_variability, Some(0.0));
    assert_eq!(result.trend, Some(0.0));
    assert_eq!(
        result.pattern,
        MoodPattern::Observed {
            variability: Some(VariabilityBand::Low),
            trend: MoodTrend::Stable,
        }
    );
    assert!(result.pattern.label().ends_with("_stable"));
}

#[test]
fn test_low_mood_recommends_a_session() {
    let result = MoodAnalyzer::new().analyze(&samples(&[1, 1, 1, 1, 1]));

    assert!(result
        .suggestions
        .iter()
        .any(|s| s.contains("scheduling a session with your therapist")));
}

#[test]
fn test_suggestion_order_is_variability_trend_average() {
    // Mean 2.1, the last five average 3.2, std dev about 1.7.
    let result = MoodAnalyzer::new().analyze(&samples(&[1, 1, 1, 1, 1, 5, 1, 1, 4, 5]));

    assert_eq!(result.pattern.label(), "high_variability_improving");
    assert_eq!(result.suggestions.len(), 5);
    assert!(result.suggestions[0].contains("significant fluctuations"));
    assert!(result.suggestions[3].contains("improving"));
    assert!(result.suggestions[4].contains("lower side"));
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_analyzer_is_shareable_across_tasks() {
    let analyzer = Arc::new(TherapyAnalyzer::new());
    let expected = analyzer.analyze_text("Everything is a disaster and I'm a failure");

    let mut handles = Vec::new();
    for _ in 0..8 {
        let analyzer = Arc::clone(&analyzer);
        handles.push(tokio::spawn(async move {
            analyzer.analyze_text("Everything is a disaster and I'm a failure")
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), expected);
    }
}
