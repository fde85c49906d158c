// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    catalog::Catalog,
    error::AppError,
    models::{attempt::SubmitQuizRequest, quiz::QuizListResponse},
    results::ResultsLog,
    scoring::score_submission,
};

fn quiz_not_found() -> AppError {
    AppError::NotFound("Quiz not found".to_string())
}

/// Lists every quiz in catalog order with its question count.
pub async fn list_quizzes(State(catalog): State<Arc<Catalog>>) -> impl IntoResponse {
    Json(QuizListResponse {
        quizzes: catalog.summaries(),
    })
}

/// Returns a quiz with its questions stripped of the correct answer.
pub async fn get_quiz(
    State(catalog): State<Arc<Catalog>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = catalog.get(&id).ok_or_else(quiz_not_found)?;
    Ok(Json(quiz.sanitized()))
}

/// Scores a submitted answer set and records the attempt.
///
/// * 404 if the quiz does not exist (checked before the body).
/// * 400 if the body does not match `{answers: [...], timeSpent}`.
/// * Answers for unknown question ids are ignored rather than rejected.
pub async fn submit_quiz(
    State(catalog): State<Arc<Catalog>>,
    State(results): State<ResultsLog>,
    Path(id): Path<String>,
    payload: Result<Json<SubmitQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = catalog.get(&id).ok_or_else(quiz_not_found)?;

    let Json(req) = payload?;
    if let Err(validation_errors) = req.validate() {
        tracing::warn!("Rejected submission for quiz {}: {}", id, validation_errors);
        return Err(validation_errors.into());
    }

    let result = score_submission(quiz, &req.answers, req.time_spent);
    results.append(result.clone()).await;

    tracing::info!(
        quiz_id = %result.quiz_id,
        score = result.score,
        total = result.total_questions,
        "Attempt recorded"
    );

    Ok(Json(result))
}
