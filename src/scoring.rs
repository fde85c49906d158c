// src/scoring.rs

use chrono::Utc;

use crate::models::{
    attempt::{AttemptResult, DetailedResult, SubmittedAnswer},
    quiz::Quiz,
};

/// Scores a submission against a quiz.
///
/// * Answers referencing unknown question ids are dropped silently.
/// * A `None` answer never matches, so timeouts count as wrong.
/// * The denominator is always the quiz's full question count.
pub fn score_submission(quiz: &Quiz, answers: &[SubmittedAnswer], time_spent: f64) -> AttemptResult {
    let detailed_results: Vec<DetailedResult> = answers
        .iter()
        .filter_map(|submitted| {
            let question = quiz.question(submitted.question_id)?;
            let correct = submitted.answer == Some(question.correct_answer as i64);
            Some(DetailedResult {
                question_id: question.id,
                question: question.question.clone(),
                user_answer: submitted.answer,
                correct_answer: question.correct_answer,
                correct,
                options: question.options.clone(),
            })
        })
        .collect();

    let score = detailed_results.iter().filter(|r| r.correct).count() as u32;
    let total_questions = quiz.questions.len();

    AttemptResult {
        quiz_id: quiz.id.clone(),
        score,
        total_questions,
        percentage: format_percentage(score, total_questions),
        time_spent,
        detailed_results,
        timestamp: Utc::now(),
    }
}

/// `score / total * 100` with two decimals. An empty quiz reports `"0.00"`.
pub fn format_percentage(score: u32, total: usize) -> String {
    if total == 0 {
        return "0.00".to_string();
    }
    format_two_decimals(score as f64 / total as f64 * 100.0)
}

/// Two-decimal rendering with halves rounded up (`2.125` -> `"2.13"`).
/// `{:.2}` alone rounds the half to even.
pub fn format_two_decimals(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}
