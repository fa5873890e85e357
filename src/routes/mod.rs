use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::SuggestionService,
};

pub mod films;
pub mod index;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub suggestions: SuggestionService,
    /// Index page HTML, read once at startup
    pub index_page: Arc<str>,
}

impl AppState {
    pub fn new(suggestions: SuggestionService, index_page: impl Into<Arc<str>>) -> Self {
        Self {
            suggestions,
            index_page: index_page.into(),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(Arc::new(state))
        .layer(
            // Request ID runs first so the trace span can pick it up
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/get-films", post(films::get_films))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
