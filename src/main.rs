// src/main.rs

use dotenvy::dotenv;
use quiz_api::catalog::Catalog;
use quiz_api::config::Config;
use quiz_api::routes;
use quiz_api::state::AppState;
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "quiz-api.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::info!("Loading quiz catalog from {}", path);
            Catalog::load(path).inspect_err(|e| {
                tracing::error!("Failed to load quiz catalog: {}", e);
            })?
        }
        None => Catalog::builtin(),
    };
    tracing::info!("Catalog ready with {} quizzes", catalog.len());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(catalog, config);

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Quiz API listening on {}", addr);
    tracing::info!("  GET  /api/quizzes             - list quizzes");
    tracing::info!("  GET  /api/quiz/{{id}}           - get a quiz");
    tracing::info!("  POST /api/quiz/{{id}}/submit    - submit answers");
    tracing::info!("  GET  /api/stats/{{id}}          - quiz statistics");
    tracing::info!("  GET  /api/leaderboard/{{id}}    - leaderboard");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start the server
    axum::serve(listener, app).await?;
    Ok(())
}
