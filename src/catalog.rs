// src/catalog.rs

use std::{collections::HashSet, fmt, path::Path};

use validator::Validate;

use crate::models::{
    question::Question,
    quiz::{Quiz, QuizSummary},
};

/// Errors raised while building the quiz catalog at startup.
#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    // A quiz failed field validation (empty title, bad options, answer index out of range...)
    Invalid { quiz_id: String, reason: String },
    DuplicateQuiz(String),
    DuplicateQuestion { quiz_id: String, question_id: i64 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "failed to read catalog: {}", e),
            CatalogError::Parse(e) => write!(f, "failed to parse catalog: {}", e),
            CatalogError::Invalid { quiz_id, reason } => {
                write!(f, "quiz '{}' is invalid: {}", quiz_id, reason)
            }
            CatalogError::DuplicateQuiz(id) => write!(f, "quiz id '{}' appears twice", id),
            CatalogError::DuplicateQuestion {
                quiz_id,
                question_id,
            } => write!(
                f,
                "question id {} appears twice in quiz '{}'",
                question_id, quiz_id
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err)
    }
}

/// The fixed, read-only set of quizzes served by the API.
/// Iteration order is insertion order.
#[derive(Debug, Clone)]
pub struct Catalog {
    quizzes: Vec<Quiz>,
}

impl Catalog {
    /// Builds a catalog, rejecting anything that could not be scored safely.
    pub fn new(quizzes: Vec<Quiz>) -> Result<Self, CatalogError> {
        let mut quiz_ids = HashSet::new();
        for quiz in &quizzes {
            if let Err(e) = quiz.validate() {
                return Err(CatalogError::Invalid {
                    quiz_id: quiz.id.clone(),
                    reason: e.to_string(),
                });
            }
            if !quiz_ids.insert(quiz.id.as_str()) {
                return Err(CatalogError::DuplicateQuiz(quiz.id.clone()));
            }
            let mut question_ids = HashSet::new();
            for q in &quiz.questions {
                if !question_ids.insert(q.id) {
                    return Err(CatalogError::DuplicateQuestion {
                        quiz_id: quiz.id.clone(),
                        question_id: q.id,
                    });
                }
            }
        }
        Ok(Self { quizzes })
    }

    /// Parses a JSON array of quizzes.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let quizzes: Vec<Quiz> = serde_json::from_str(raw)?;
        Self::new(quizzes)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn get(&self, id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == id)
    }

    pub fn summaries(&self) -> Vec<QuizSummary> {
        self.quizzes.iter().map(Quiz::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    /// The catalog shipped with the server: general knowledge and science.
    pub fn builtin() -> Self {
        Self {
            quizzes: vec![
                Quiz {
                    id: "general".to_string(),
                    title: "General Knowledge Quiz".to_string(),
                    questions: vec![
                        q(1, "What is the capital of France?", &["London", "Berlin", "Paris", "Madrid"], 2),
                        q(2, "Which planet is known as the Red Planet?", &["Venus", "Mars", "Jupiter", "Saturn"], 1),
                        q(3, "What is 2 + 2?", &["3", "4", "5", "6"], 1),
                        q(4, "Who painted the Mona Lisa?", &["Van Gogh", "Picasso", "Da Vinci", "Monet"], 2),
                        q(5, "What is the largest ocean on Earth?", &["Atlantic", "Indian", "Arctic", "Pacific"], 3),
                        q(6, "In which year did World War II end?", &["1943", "1944", "1945", "1946"], 2),
                        q(7, "What is the chemical symbol for gold?", &["Go", "Gd", "Au", "Ag"], 2),
                        q(8, "Which country is home to the kangaroo?", &["New Zealand", "Australia", "South Africa", "Brazil"], 1),
                        q(9, "How many continents are there?", &["5", "6", "7", "8"], 2),
                        q(10, "What is the smallest prime number?", &["0", "1", "2", "3"], 2),
                    ],
                },
                Quiz {
                    id: "science".to_string(),
                    title: "Science Quiz".to_string(),
                    questions: vec![
                        q(1, "What is H2O commonly known as?", &["Oxygen", "Hydrogen", "Water", "Carbon"], 2),
                        q(2, "How many bones are in the human body?", &["186", "206", "226", "246"], 1),
                        q(3, "What is the speed of light?", &["300,000 km/s", "150,000 km/s", "450,000 km/s", "600,000 km/s"], 0),
                        q(4, "What is the powerhouse of the cell?", &["Nucleus", "Ribosome", "Mitochondria", "Chloroplast"], 2),
                        q(5, "What gas do plants absorb from the atmosphere?", &["Oxygen", "Nitrogen", "Carbon Dioxide", "Hydrogen"], 2),
                    ],
                },
            ],
        }
    }
}

fn q(id: i64, text: &str, options: &[&str], correct_answer: usize) -> Question {
    Question {
        id,
        question: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
    }
}
