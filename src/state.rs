// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{catalog::Catalog, config::Config, results::ResultsLog};

/// Everything a request handler may touch. Each server (and each test)
/// owns its own instance.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub results: ResultsLog,
    pub config: Config,
}

impl AppState {
    pub fn new(catalog: Catalog, config: Config) -> Self {
        Self {
            catalog: Arc::new(catalog),
            results: ResultsLog::new(),
            config,
        }
    }
}

impl FromRef<AppState> for Arc<Catalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<AppState> for ResultsLog {
    fn from_ref(state: &AppState) -> Self {
        state.results.clone()
    }
}
