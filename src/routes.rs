// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{health, quiz, stats},
    state::AppState,
};

/// Builds the CORS policy. No configured origins means any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Assembles the main application router.
///
/// * `/api/quizzes`, `/api/quiz/{id}` and `/api/quiz/{id}/submit` for the catalog and scoring.
/// * `/api/stats/{id}` and `/api/leaderboard/{id}` for aggregates.
/// * `/health` for liveness.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    let quiz_routes = Router::new()
        .route("/{id}", get(quiz::get_quiz))
        .route("/{id}/submit", post(quiz::submit_quiz));

    Router::new()
        .route("/api/quizzes", get(quiz::list_quizzes))
        .nest("/api/quiz", quiz_routes)
        .route("/api/stats/{id}", get(stats::get_stats))
        .route("/api/leaderboard/{id}", get(stats::get_leaderboard))
        .route("/health", get(health::health))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
