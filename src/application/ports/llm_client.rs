use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ChatMessage;

/// A fully assembled chat completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    /// Upstream model identifier.
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// The parts of an upstream response the proxy cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCompletion {
    pub content: String,
    pub usage: Value,
    pub finish_reason: Option<String>,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat(&self, request: ChatCompletionRequest) -> Result<RawCompletion, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("request timed out")]
    Timeout,
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
