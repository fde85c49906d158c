// src/client/session.rs

use std::{fmt, time::Duration};

use tokio::time::Instant;

use crate::{
    client::{
        api::{ClientError, QuizApi},
        countdown::Countdown,
    },
    models::{
        attempt::{AttemptResult, QuizStats, SubmitQuizRequest, SubmittedAnswer},
        question::PublicQuestion,
        quiz::{PublicQuiz, QuizSummary},
    },
};

/// Where a session currently is.
///
/// `Idle → Loading → InProgress(0) → Answered(0) → InProgress(1) → … →
/// Submitting → Finished`. `ViewingStats` is entered from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    InProgress { index: usize },
    Answered { index: usize },
    Submitting,
    Finished,
    ViewingStats,
}

#[derive(Debug)]
pub enum SessionError {
    /// The operation is not allowed in the current state.
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
    /// The chosen option does not exist for the current question.
    InvalidOption(usize),
    EmptyQuiz(String),
    Api(ClientError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidState { operation, state } => {
                write!(f, "cannot {} while {:?}", operation, state)
            }
            SessionError::InvalidOption(i) => write!(f, "option {} does not exist", i),
            SessionError::EmptyQuiz(id) => write!(f, "quiz '{}' has no questions", id),
            SessionError::Api(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ClientError> for SessionError {
    fn from(err: ClientError) -> Self {
        SessionError::Api(err)
    }
}

/// How an attempt ended.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The server scored and stored the attempt.
    Confirmed(AttemptResult),
    /// Submission failed. Nothing is known to be stored server-side and the
    /// client has no answer key, so no score is shown.
    Unconfirmed {
        answered: usize,
        total_questions: usize,
        error: String,
    },
}

impl Outcome {
    pub fn score(&self) -> Option<u32> {
        match self {
            Outcome::Confirmed(result) => Some(result.score),
            Outcome::Unconfirmed { .. } => None,
        }
    }
}

/// Stats and leaderboard fetched together for the stats view.
#[derive(Debug, Clone)]
pub struct QuizOverview {
    pub stats: QuizStats,
    pub leaderboard: Vec<AttemptResult>,
}

/// Drives one timed attempt against a `QuizApi`.
///
/// At most one countdown is live: beginning a question replaces the previous
/// one and answering or timing out clears it.
pub struct QuizSession<A> {
    api: A,
    question_time: Duration,
    state: SessionState,
    quiz: Option<PublicQuiz>,
    answers: Vec<SubmittedAnswer>,
    started_at: Option<Instant>,
    countdown: Option<Countdown>,
    outcome: Option<Outcome>,
    overview: Option<QuizOverview>,
}

impl<A: QuizApi> QuizSession<A> {
    pub fn new(api: A, question_time: Duration) -> Self {
        Self {
            api,
            question_time,
            state: SessionState::Idle,
            quiz: None,
            answers: Vec::new(),
            started_at: None,
            countdown: None,
            outcome: None,
            overview: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn quiz(&self) -> Option<&PublicQuiz> {
        self.quiz.as_ref()
    }

    pub fn answers(&self) -> &[SubmittedAnswer] {
        &self.answers
    }

    pub fn countdown(&self) -> Option<Countdown> {
        self.countdown
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn overview(&self) -> Option<&QuizOverview> {
        self.overview.as_ref()
    }

    /// The question on screen, answered or not.
    pub fn current_question(&self) -> Option<(usize, &PublicQuestion)> {
        let index = match self.state {
            SessionState::InProgress { index } | SessionState::Answered { index } => index,
            _ => return None,
        };
        self.quiz
            .as_ref()
            .and_then(|q| q.questions.get(index))
            .map(|q| (index, q))
    }

    /// Fetches the catalog. Failures are logged and returned.
    pub async fn catalog(&self) -> Result<Vec<QuizSummary>, SessionError> {
        self.api.list_quizzes().await.map_err(|e| {
            tracing::error!("Error fetching quizzes: {}", e);
            SessionError::from(e)
        })
    }

    /// Loads a quiz and shows its first question.
    pub async fn start(&mut self, quiz_id: &str) -> Result<(), SessionError> {
        self.expect_idle("start a quiz")?;
        self.state = SessionState::Loading;

        let quiz = match self.api.get_quiz(quiz_id).await {
            Ok(quiz) => quiz,
            Err(e) => {
                tracing::error!("Error fetching quiz questions: {}", e);
                self.state = SessionState::Idle;
                return Err(e.into());
            }
        };
        if quiz.questions.is_empty() {
            self.state = SessionState::Idle;
            return Err(SessionError::EmptyQuiz(quiz.id));
        }

        self.quiz = Some(quiz);
        self.answers.clear();
        self.outcome = None;
        self.started_at = Some(Instant::now());
        self.begin_question(0);
        Ok(())
    }

    fn begin_question(&mut self, index: usize) {
        self.state = SessionState::InProgress { index };
        self.countdown = Some(Countdown::start(self.question_time));
    }

    fn in_progress(&self, operation: &'static str) -> Result<usize, SessionError> {
        match self.state {
            SessionState::InProgress { index } => Ok(index),
            state => Err(SessionError::InvalidState { operation, state }),
        }
    }

    fn expect_idle(&self, operation: &'static str) -> Result<(), SessionError> {
        match self.state {
            SessionState::Idle => Ok(()),
            state => Err(SessionError::InvalidState { operation, state }),
        }
    }

    fn record(&mut self, index: usize, answer: Option<i64>) {
        let question_id = self
            .quiz
            .as_ref()
            .map(|q| q.questions[index].id)
            .unwrap_or_default();
        self.answers.push(SubmittedAnswer {
            question_id,
            answer,
        });
        self.countdown = None;
        self.state = SessionState::Answered { index };
    }

    /// Records the player's choice for the current question.
    pub fn answer(&mut self, option: usize) -> Result<(), SessionError> {
        let index = self.in_progress("answer")?;
        let options = self
            .quiz
            .as_ref()
            .map(|q| q.questions[index].options.len())
            .unwrap_or_default();
        if option >= options {
            return Err(SessionError::InvalidOption(option));
        }
        self.record(index, Some(option as i64));
        Ok(())
    }

    /// Records a blank answer because the countdown ran out.
    pub fn time_out(&mut self) -> Result<(), SessionError> {
        let index = self.in_progress("time out")?;
        tracing::debug!("Question {} timed out", index);
        self.record(index, None);
        Ok(())
    }

    /// Moves past an answered question: either to the next one or, after
    /// the last, submits the attempt.
    pub async fn advance(&mut self) -> Result<(), SessionError> {
        let index = match self.state {
            SessionState::Answered { index } => index,
            state => {
                return Err(SessionError::InvalidState {
                    operation: "advance",
                    state,
                });
            }
        };
        let total = self.quiz.as_ref().map_or(0, |q| q.questions.len());
        if index + 1 < total {
            self.begin_question(index + 1);
        } else {
            self.submit().await;
        }
        Ok(())
    }

    async fn submit(&mut self) {
        self.state = SessionState::Submitting;
        let Some(quiz) = self.quiz.as_ref() else {
            self.state = SessionState::Idle;
            return;
        };

        let time_spent = self
            .started_at
            .map(|t| t.elapsed().as_secs())
            .unwrap_or_default() as f64;
        let request = SubmitQuizRequest {
            answers: self.answers.clone(),
            time_spent,
        };

        let outcome = match self.api.submit(&quiz.id, &request).await {
            Ok(result) => Outcome::Confirmed(result),
            Err(e) => {
                tracing::error!("Error submitting quiz: {}", e);
                Outcome::Unconfirmed {
                    answered: self.answers.len(),
                    total_questions: quiz.questions.len(),
                    error: e.to_string(),
                }
            }
        };
        self.outcome = Some(outcome);
        self.state = SessionState::Finished;
    }

    /// Loads stats and leaderboard for a quiz.
    pub async fn view_stats(&mut self, quiz_id: &str) -> Result<&QuizOverview, SessionError> {
        self.expect_idle("view stats")?;
        self.state = SessionState::ViewingStats;

        let (stats, leaderboard) =
            tokio::join!(self.api.stats(quiz_id), self.api.leaderboard(quiz_id));
        match (stats, leaderboard) {
            (Ok(stats), Ok(leaderboard)) => {
                Ok(&*self.overview.insert(QuizOverview { stats, leaderboard }))
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!("Error fetching stats: {}", e);
                self.state = SessionState::Idle;
                Err(e.into())
            }
        }
    }

    /// Abandons whatever is in progress and returns to `Idle`.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.quiz = None;
        self.answers.clear();
        self.started_at = None;
        self.countdown = None;
        self.outcome = None;
        self.overview = None;
    }
}
