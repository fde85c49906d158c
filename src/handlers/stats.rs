// src/handlers/stats.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{models::attempt::LeaderboardResponse, results::ResultsLog};

/// Aggregate stats for a quiz id. Unknown ids are not an error: they simply
/// have no attempts.
pub async fn get_stats(
    State(results): State<ResultsLog>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(results.stats(&id).await)
}

/// Retrieves the top attempts for a quiz, full results included.
pub async fn get_leaderboard(
    State(results): State<ResultsLog>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(LeaderboardResponse {
        leaderboard: results.leaderboard(&id).await,
    })
}
