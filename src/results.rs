// src/results.rs

use std::{cmp::Ordering, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    config::LEADERBOARD_SIZE,
    models::attempt::{AttemptResult, QuizStats},
};

/// Append-only, process-lifetime log of scored attempts.
///
/// Cloning shares the same log. Appends hold the write lock so concurrent
/// submissions never lose an entry, and reads see a consistent snapshot.
#[derive(Debug, Clone, Default)]
pub struct ResultsLog {
    entries: Arc<RwLock<Vec<AttemptResult>>>,
}

impl ResultsLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, result: AttemptResult) {
        self.entries.write().await.push(result);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Attempt count, mean and best score for one quiz id.
    /// Unknown ids produce all-zero stats.
    pub async fn stats(&self, quiz_id: &str) -> QuizStats {
        let entries = self.entries.read().await;
        let scores: Vec<u32> = entries
            .iter()
            .filter(|r| r.quiz_id == quiz_id)
            .map(|r| r.score)
            .collect();

        if scores.is_empty() {
            return QuizStats::empty(quiz_id);
        }

        let total: u64 = scores.iter().map(|&s| s as u64).sum();
        QuizStats {
            quiz_id: quiz_id.to_string(),
            total_attempts: scores.len(),
            average_score: Some(total as f64 / scores.len() as f64),
            highest_score: scores.iter().copied().max().unwrap_or(0),
        }
    }

    /// Top attempts for a quiz: score descending, then time spent ascending.
    /// Equal keys keep log order.
    pub async fn leaderboard(&self, quiz_id: &str) -> Vec<AttemptResult> {
        let mut ranked: Vec<AttemptResult> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|r| r.quiz_id == quiz_id)
            .cloned()
            .collect();

        ranked.sort_by(|a, b| {
            b.score.cmp(&a.score).then_with(|| {
                a.time_spent
                    .partial_cmp(&b.time_spent)
                    .unwrap_or(Ordering::Equal)
            })
        });
        ranked.truncate(LEADERBOARD_SIZE);
        ranked
    }
}
