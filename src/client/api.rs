// src/client/api.rs

use std::fmt;

use async_trait::async_trait;
use reqwest::Response;
use serde::{Deserialize, de::DeserializeOwned};
use url::Url;

use crate::models::{
    attempt::{AttemptResult, LeaderboardResponse, QuizStats, SubmitQuizRequest},
    quiz::{PublicQuiz, QuizListResponse, QuizSummary},
};

#[derive(Debug)]
pub enum ClientError {
    /// Connection, timeout or body decoding failure.
    Http(reqwest::Error),
    /// The server answered with a non-success status.
    Status { status: u16, message: String },
    BaseUrl(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "request failed: {}", e),
            ClientError::Status { status, message } => {
                write!(f, "server returned {}: {}", status, message)
            }
            ClientError::BaseUrl(url) => write!(f, "invalid API base URL: {}", url),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err)
    }
}

/// Operations the quiz client needs from a backend.
#[async_trait]
pub trait QuizApi: Send + Sync {
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, ClientError>;

    async fn get_quiz(&self, quiz_id: &str) -> Result<PublicQuiz, ClientError>;

    async fn submit(
        &self,
        quiz_id: &str,
        request: &SubmitQuizRequest,
    ) -> Result<AttemptResult, ClientError>;

    async fn stats(&self, quiz_id: &str) -> Result<QuizStats, ClientError>;

    async fn leaderboard(&self, quiz_id: &str) -> Result<Vec<AttemptResult>, ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// `QuizApi` over the HTTP/JSON interface.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|_| ClientError::BaseUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::BaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::BaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let response = self.http.get(self.endpoint(segments)?).send().await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .map(|b| b.error)
        .unwrap_or_else(|_| status.to_string());
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl QuizApi for ApiClient {
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, ClientError> {
        let list: QuizListResponse = self.get(&["api", "quizzes"]).await?;
        Ok(list.quizzes)
    }

    async fn get_quiz(&self, quiz_id: &str) -> Result<PublicQuiz, ClientError> {
        self.get(&["api", "quiz", quiz_id]).await
    }

    async fn submit(
        &self,
        quiz_id: &str,
        request: &SubmitQuizRequest,
    ) -> Result<AttemptResult, ClientError> {
        let url = self.endpoint(&["api", "quiz", quiz_id, "submit"])?;
        let response = self.http.post(url).json(request).send().await?;
        read_json(response).await
    }

    async fn stats(&self, quiz_id: &str) -> Result<QuizStats, ClientError> {
        self.get(&["api", "stats", quiz_id]).await
    }

    async fn leaderboard(&self, quiz_id: &str) -> Result<Vec<AttemptResult>, ClientError> {
        let board: LeaderboardResponse = self.get(&["api", "leaderboard", quiz_id]).await?;
        Ok(board.leaderboard)
    }
}
