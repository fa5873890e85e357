use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;

use common_movies::{
    error::{AppError, AppResult},
    routes::{create_router, AppState},
    services::{providers::CompletionProvider, SuggestionService},
};

const INDEX_PAGE: &str = "<html><body><form>movies</form></body></html>";

/// Provider that replays a canned reply and records the prompts it was sent
struct StubProvider {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl StubProvider {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(AppError::ExternalApi)
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

struct HangingProvider;

#[async_trait::async_trait]
impl CompletionProvider for HangingProvider {
    async fn complete(&self, _prompt: &str) -> AppResult<String> {
        std::future::pending().await
    }

    fn name(&self) -> &'static str {
        "hanging"
    }
}

fn create_test_server(provider: Arc<dyn CompletionProvider>, timeout: Duration) -> TestServer {
    let state = AppState::new(SuggestionService::new(provider, timeout), INDEX_PAGE);
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(StubProvider::replying(""), Duration::from_secs(5));
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_index_serves_form_page() {
    let server = create_test_server(StubProvider::replying(""), Duration::from_secs(5));
    let response = server.get("/").await;
    response.assert_status_ok();
    assert_eq!(response.text(), INDEX_PAGE);
}

#[tokio::test]
async fn test_get_films_renders_suggestions() {
    let provider = StubProvider::replying(
        r#"{"common_movies": [
            {"name": "Interstellar", "likelihood": "85%"},
            {"name": "Blade Runner 2049", "likelihood": "70%"},
            {"name": "Arrival", "likelihood": "65%"}
        ]}"#,
    );
    let server = create_test_server(provider.clone(), Duration::from_secs(5));

    let response = server
        .post("/api/get-films")
        .form(&[("inception_col1", "Inception"), ("matrix_col2", "The Matrix")])
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("<strong>Interstellar</strong> - Likelihood: 85%"));
    assert!(html.contains("<strong>Blade Runner 2049</strong> - Likelihood: 70%"));
    assert!(html.contains("<strong>Arrival</strong> - Likelihood: 65%"));
    assert!(!html.contains("text-red-500"));

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains(r#"List 1: ["Inception"]"#));
    assert!(prompts[0].contains(r#"List 2: ["The Matrix"]"#));
}

#[tokio::test]
async fn test_get_films_ignores_unrelated_fields() {
    let provider = StubProvider::replying(r#"{"common_movies": []}"#);
    let server = create_test_server(provider.clone(), Duration::from_secs(5));

    let response = server
        .post("/api/get-films")
        .form(&[
            ("csrf_token", "abc"),
            ("movie_col1", "Alien"),
            ("movie_col_2", "Nope"),
            ("movie_col2", "Aliens"),
            ("movie_col2", "Heat"),
        ])
        .await;

    response.assert_status_ok();
    let prompts = provider.prompts();
    assert!(prompts[0].contains(r#"List 1: ["Alien"]"#));
    assert!(prompts[0].contains(r#"List 2: ["Aliens", "Heat"]"#));
    assert!(!prompts[0].contains("Nope"));
}

#[tokio::test]
async fn test_get_films_drops_inputs_left_empty() {
    let provider = StubProvider::replying(r#"{"common_movies": []}"#);
    let server = create_test_server(provider.clone(), Duration::from_secs(5));

    let response = server
        .post("/api/get-films")
        .form(&[
            ("movie1_col1", "Inception"),
            ("movie2_col1", ""),
            ("movie3_col1", ""),
            ("movie1_col2", ""),
            ("movie2_col2", ""),
            ("movie3_col2", ""),
        ])
        .await;

    response.assert_status_ok();
    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains(r#"List 1: ["Inception"]"#));
    assert!(prompts[0].contains("List 2: []"));
}

#[tokio::test]
async fn test_get_films_prose_reply_is_degraded() {
    let provider = StubProvider::replying("You would both love Heat and Ronin.");
    let server = create_test_server(provider, Duration::from_secs(5));

    let response = server
        .post("/api/get-films")
        .form(&[("movie_col1", "Collateral")])
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Could not parse suggestions"));
    assert!(html.contains("<h3>Common Movies</h3>"));
    assert!(!html.contains("<li "));
}

#[tokio::test]
async fn test_get_films_provider_failure_is_visible() {
    let provider = StubProvider::failing("OpenAI API returned status 401: invalid key");
    let server = create_test_server(provider, Duration::from_secs(5));

    let response = server
        .post("/api/get-films")
        .form(&[("movie_col1", "Collateral"), ("movie_col2", "Drive")])
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("text-red-500"));
    assert!(html.contains("Something went wrong"));
    assert!(html.contains("invalid key"));
}

#[tokio::test]
async fn test_get_films_provider_timeout_is_visible() {
    let server = create_test_server(Arc::new(HangingProvider), Duration::from_millis(50));

    let response = server
        .post("/api/get-films")
        .form(&[("movie_col1", "Collateral")])
        .await;

    response.assert_status_ok();
    assert!(response
        .text()
        .contains("Something went wrong: Timed out after 50ms"));
}

#[tokio::test]
async fn test_get_films_escapes_model_output() {
    let provider = StubProvider::replying(
        r#"{"common_movies": [{"name": "<script>alert(1)</script>", "likelihood": "99%"}]}"#,
    );
    let server = create_test_server(provider, Duration::from_secs(5));

    let response = server
        .post("/api/get-films")
        .form(&[("movie_col1", "Heat")])
        .await;

    let html = response.text();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(StubProvider::replying(""), Duration::from_secs(5));

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-123"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "trace-123");

    let response = server.get("/health").await;
    let generated = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_get_films_rejects_non_form_body() {
    let server = create_test_server(StubProvider::replying(""), Duration::from_secs(5));

    let response = server
        .post("/api/get-films")
        .json(&serde_json::json!({ "movie_col1": "Heat" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
