use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use common_movies::{
    config::Config,
    routes::{create_router, index::load_index_page, AppState},
    services::{providers::OpenAiProvider, SuggestionService},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("common_movies=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let index_page = load_index_page(&config).await?;

    let provider = OpenAiProvider::from_config(&config);
    tracing::info!(
        model = %provider.model(),
        api_url = %config.openai_api_url,
        timeout_secs = config.provider_timeout_secs,
        "Completion provider configured"
    );

    let suggestions = SuggestionService::new(Arc::new(provider), config.provider_timeout());
    let app = create_router(AppState::new(suggestions, index_page));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!(address = %address, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
