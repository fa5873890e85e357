use anyhow::Context;
use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::{config::Config, routes::AppState};

/// Reads the form page named by `INDEX_TEMPLATE`. The server refuses to start without it.
pub async fn load_index_page(config: &Config) -> anyhow::Result<String> {
    tokio::fs::read_to_string(&config.index_template)
        .await
        .with_context(|| format!("Failed to read index template {}", config.index_template))
}

/// Serves the form page
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.index_page.to_string())
}
