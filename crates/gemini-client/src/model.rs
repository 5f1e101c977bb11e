use async_trait::async_trait;

use crate::error::CompletionResult;
use crate::GeminiClient;

/// Backend-agnostic interface for text completion.
///
/// Implemented by the Gemini HTTP client and by test substitutes, so the
/// pipeline can be exercised without a live endpoint.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> CompletionResult<String>;

    fn backend_name(&self) -> &'static str;
}

#[async_trait]
impl CompletionModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> CompletionResult<String> {
        GeminiClient::complete(self, prompt).await
    }

    fn backend_name(&self) -> &'static str {
        "gemini"
    }
}
