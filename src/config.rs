// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Number of entries returned by the leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub log_dir: String,
    /// JSON catalog to serve instead of the built-in quizzes.
    pub catalog_path: Option<String>,
    /// Empty means any origin is allowed.
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            catalog_path: None,
            allowed_origins: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        let catalog_path = env::var("QUIZ_CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty());

        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Self {
            port,
            rust_log,
            log_dir,
            catalog_path,
            allowed_origins,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
