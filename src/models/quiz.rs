// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::{PublicQuestion, Question};

/// A titled, ordered sequence of questions.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Quiz {
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1), nested)]
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Finds a question by its per-quiz id.
    pub fn question(&self, id: i64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            question_count: self.questions.len(),
        }
    }

    /// Copy of the quiz with every answer key stripped.
    pub fn sanitized(&self) -> PublicQuiz {
        PublicQuiz {
            id: self.id.clone(),
            title: self.title.clone(),
            questions: self.questions.iter().map(PublicQuestion::from).collect(),
        }
    }
}

/// Entry of `GET /api/quizzes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub question_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizListResponse {
    pub quizzes: Vec<QuizSummary>,
}

/// DTO for `GET /api/quiz/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicQuiz {
    pub id: String,
    pub title: String,
    pub questions: Vec<PublicQuestion>,
}
