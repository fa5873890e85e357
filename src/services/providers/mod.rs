/// Completion provider abstraction
///
/// The suggestion pipeline only needs "prompt in, text out". Each backend
/// (OpenAI, or a stub in tests) implements [`CompletionProvider`] and is shared
/// behind an `Arc<dyn CompletionProvider>`.
use crate::error::AppResult;

pub mod openai;

pub use openai::OpenAiProvider;

/// Trait for chat-completion backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends `prompt` as a single user message and returns the text of the first reply
    async fn complete(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
