// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A multiple-choice question as held in the catalog.
/// `id` is only unique within its quiz.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_correct_answer))]
pub struct Question {
    pub id: i64,

    /// The text shown to the player.
    #[validate(length(min = 1, max = 1000))]
    pub question: String,

    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,

    /// Zero-based index into `options`.
    pub correct_answer: usize,
}

/// DTO for sending a question to a client before submission (no answer key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            question: q.question.clone(),
            options: q.options.clone(),
        }
    }
}

fn validate_options(options: &[String]) -> Result<(), ValidationError> {
    if options.len() < 2 {
        return Err(ValidationError::new("at_least_two_options"));
    }
    for opt in options {
        if opt.is_empty() || opt.len() > 500 {
            return Err(ValidationError::new("invalid_option_length"));
        }
    }
    Ok(())
}

fn validate_correct_answer(q: &Question) -> Result<(), ValidationError> {
    if q.correct_answer >= q.options.len() {
        return Err(ValidationError::new("correct_answer_out_of_range"));
    }
    Ok(())
}
