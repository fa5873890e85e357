/// OpenAI chat-completions provider
///
/// POSTs `{api_url}/chat/completions` with the configured model and one user
/// message, and returns the content of the first choice. Works against any
/// OpenAI-compatible endpoint.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ChatCompletionRequest, ChatCompletionResponse},
    services::providers::CompletionProvider,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: Option<String>, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }

    /// Creates a provider from application config, warning when no API key is set
    pub fn from_config(config: &Config) -> Self {
        let api_key = config.api_key().map(str::to_string);
        if api_key.is_none() {
            tracing::warn!(
                "No OpenAI API key found. Set the OPENAI_API_KEY environment variable; \
                 completion requests will fail until it is configured"
            );
        }

        Self::new(
            api_key,
            config.openai_api_url.clone(),
            config.openai_model.clone(),
        )
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_url.trim_end_matches('/'))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let body = ChatCompletionRequest::user_prompt(&self.model, prompt);

        let mut request = self.http_client.post(self.completions_url()).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OpenAI API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw OpenAI API response");

        let completion: ChatCompletionResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                tracing::error!(
                    error = %e,
                    response = %response_text,
                    "Failed to deserialize OpenAI response"
                );
                AppError::ExternalApi(format!("Failed to parse OpenAI response: {}", e))
            })?;

        let content = completion.first_content().ok_or_else(|| {
            AppError::ExternalApi("OpenAI response contained no reply".to_string())
        })?;

        tracing::info!(
            model = %self.model,
            reply_len = content.len(),
            provider = self.name(),
            "Completion received"
        );

        Ok(content)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
