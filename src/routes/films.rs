use axum::{extract::State, response::Html, Extension, Form};
use std::sync::Arc;

use crate::{
    middleware::request_id::RequestId,
    routes::AppState,
    services::{form_decoder, render, Outcome},
};

/// Handler for the film suggestion endpoint
///
/// Always answers with an HTML fragment; provider and parse failures are
/// rendered as a visible error message instead of failing the request.
pub async fn get_films(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Html<String> {
    let submitted = fields.len();
    let lists = form_decoder::decode(fields);

    tracing::info!(
        request_id = %request_id,
        submitted_fields = submitted,
        total = lists.len(),
        list_1_count = lists.list_a.len(),
        list_2_count = lists.list_b.len(),
        "Processing film suggestion request"
    );

    if lists.is_empty() {
        tracing::warn!(
            request_id = %request_id,
            "No movie titles submitted; asking for suggestions anyway"
        );
    }

    let outcome = state.suggestions.suggest(&lists).await;

    match &outcome {
        Outcome::Suggestions(suggestions) => tracing::info!(
            request_id = %request_id,
            suggestions = suggestions.len(),
            "Film suggestions completed"
        ),
        Outcome::Degraded(degraded) => tracing::warn!(
            request_id = %request_id,
            kind = ?degraded.kind,
            "Film suggestions degraded"
        ),
    }

    Html(render::render_outcome(&outcome))
}
