// src/client/mod.rs

//! Client side of the quiz: an HTTP binding to the API and the state
//! machine that drives one timed attempt.

pub mod api;
pub mod countdown;
pub mod session;

use std::{env, time::Duration};

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Seconds a player gets for each question.
pub const DEFAULT_QUESTION_SECONDS: u64 = 15;

/// Pause after an answer before the next question is shown.
pub const ANSWER_REVEAL_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub question_time: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            question_time: Duration::from_secs(DEFAULT_QUESTION_SECONDS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("QUIZ_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let question_time = env::var("QUIZ_QUESTION_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&s| s > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_QUESTION_SECONDS));

        Self {
            api_url,
            question_time,
        }
    }
}
