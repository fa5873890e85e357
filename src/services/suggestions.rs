use std::{sync::Arc, time::Duration};

use crate::{
    error::AppError,
    models::{MovieLists, SuggestionReply, SuggestionResult, SCHEMA_VERSION},
    services::{prompt::build_prompt, providers::CompletionProvider},
};

/// Why a request produced no suggestions
#[derive(thiserror::Error, Debug)]
pub enum SuggestionError {
    #[error("Something went wrong: {0}")]
    ProviderCall(#[from] AppError),

    #[error("Could not parse suggestions: {0}")]
    ResponseDecode(#[from] serde_json::Error),
}

/// User-visible stand-in for a result when the pipeline fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedOutput {
    pub kind: DegradedKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedKind {
    ProviderCallFailure,
    ResponseDecodeFailure,
}

impl From<SuggestionError> for DegradedOutput {
    fn from(error: SuggestionError) -> Self {
        let kind = match error {
            SuggestionError::ProviderCall(_) => DegradedKind::ProviderCallFailure,
            SuggestionError::ResponseDecode(_) => DegradedKind::ResponseDecodeFailure,
        };
        Self {
            kind,
            message: error.to_string(),
        }
    }
}

/// What one request ends with: suggestions, or a message explaining why there are none
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Suggestions(SuggestionResult),
    Degraded(DegradedOutput),
}

/// Decodes the model's reply text into suggestions.
///
/// The reply must be a JSON object of the [`SuggestionReply`] shape. Surrounding
/// whitespace and one Markdown code fence are tolerated; anything else is an error.
pub fn interpret(raw: &str) -> Result<SuggestionResult, SuggestionError> {
    let reply: SuggestionReply = serde_json::from_str(strip_code_fence(raw))?;

    let total = reply.common_movies.len();
    let suggestions: SuggestionResult = reply
        .common_movies
        .into_iter()
        .filter(|s| !s.name.trim().is_empty())
        .collect();

    if suggestions.len() < total {
        tracing::warn!(
            dropped = total - suggestions.len(),
            "Dropped suggestions without a movie name"
        );
    }

    Ok(suggestions)
}

/// Returns the body of a ```` ``` ```` fenced block, or the trimmed input if it is not fenced
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Skip the info string, e.g. "json", whether or not a newline follows it
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body
            .trim_start_matches(|c: char| c.is_ascii_alphabetic())
            .trim(),
    }
}

/// Runs the prompt, completion and parse steps for one request
#[derive(Clone)]
pub struct SuggestionService {
    provider: Arc<dyn CompletionProvider>,
    timeout: Duration,
}

impl SuggestionService {
    pub fn new(provider: Arc<dyn CompletionProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Asks the provider for movies both lists' owners would like.
    ///
    /// Makes exactly one provider call. Failures come back as [`Outcome::Degraded`].
    pub async fn suggest(&self, lists: &MovieLists) -> Outcome {
        match self.try_suggest(lists).await {
            Ok(suggestions) => Outcome::Suggestions(suggestions),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = self.provider.name(),
                    "Returning degraded output"
                );
                Outcome::Degraded(e.into())
            }
        }
    }

    async fn try_suggest(&self, lists: &MovieLists) -> Result<SuggestionResult, SuggestionError> {
        let prompt = build_prompt(&lists.list_a, &lists.list_b);

        let raw = tokio::time::timeout(self.timeout, self.provider.complete(&prompt))
            .await
            .map_err(|_| AppError::Timeout(self.timeout))??;

        let suggestions = interpret(&raw)?;

        tracing::info!(
            suggestions = suggestions.len(),
            schema_version = SCHEMA_VERSION,
            provider = self.provider.name(),
            "Suggestions parsed"
        );

        Ok(suggestions)
    }
}
