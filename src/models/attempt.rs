// src/models/attempt.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One answer inside a submission.
/// `answer` is `None` when the player ran out of time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: i64,
    pub answer: Option<i64>,
}

/// DTO for `POST /api/quiz/{id}/submit`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    pub answers: Vec<SubmittedAnswer>,

    /// Elapsed seconds as measured by the caller.
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub time_spent: f64,
}

/// Per-question outcome echoed back after scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedResult {
    pub question_id: i64,
    pub question: String,
    pub user_answer: Option<i64>,
    pub correct_answer: usize,
    pub correct: bool,
    pub options: Vec<String>,
}

/// The scored record of one attempt. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    pub quiz_id: String,
    pub score: u32,
    pub total_questions: usize,
    /// `score / total_questions * 100` with exactly two decimals, e.g. `"20.00"`.
    pub percentage: String,
    pub time_spent: f64,
    pub detailed_results: Vec<DetailedResult>,
    pub timestamp: DateTime<Utc>,
}

/// Aggregates for `GET /api/stats/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    pub quiz_id: String,
    pub total_attempts: usize,
    /// `None` until the first attempt; serialized as `0`, otherwise as a
    /// two-decimal string.
    #[serde(with = "average_score")]
    pub average_score: Option<f64>,
    pub highest_score: u32,
}

impl QuizStats {
    pub fn empty(quiz_id: &str) -> Self {
        Self {
            quiz_id: quiz_id.to_string(),
            total_attempts: 0,
            average_score: None,
            highest_score: 0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<AttemptResult>,
}

mod average_score {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(avg) => s.serialize_str(&crate::scoring::format_two_decimals(*avg)),
            None => s.serialize_u8(0),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        match Raw::deserialize(d)? {
            Raw::Number(n) if n == 0.0 => Ok(None),
            Raw::Number(n) => Ok(Some(n)),
            Raw::Text(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}
