use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{ChatCompletionRequest, LlmClient, LlmClientError, RawCompletion};
use crate::domain::ChatMessage;
use crate::presentation::config::UpstreamSettings;

/// Client for Groq's OpenAI-compatible chat completions endpoint.
pub struct GroqClient {
    client: Client,
    api_url: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Value>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GroqClient {
    pub fn new(settings: &UpstreamSettings) -> Result<Self, LlmClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmClientError::ApiRequestFailed(format!("client build failed: {e}")))?;

        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone().unwrap_or_default(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }

    fn parse_completion(response: ChatCompletionResponse) -> Result<RawCompletion, LlmClientError> {
        let usage = response
            .usage
            .unwrap_or_else(|| Value::Object(Default::default()));

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            LlmClientError::InvalidResponse("missing choices[0]".to_string())
        })?;

        let content = choice.message.content.ok_or_else(|| {
            LlmClientError::InvalidResponse("missing choices[0].message.content".to_string())
        })?;

        Ok(RawCompletion {
            content,
            usage,
            finish_reason: choice.finish_reason,
        })
    }
}

#[async_trait]
impl LlmClient for GroqClient {
    #[tracing::instrument(skip(self, request), fields(model = %request.model))]
    async fn chat(&self, request: ChatCompletionRequest) -> Result<RawCompletion, LlmClientError> {
        let body = ChatCompletionBody {
            model: &request.model,
            messages: &request.messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: false,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmClientError::Timeout
                } else {
                    LlmClientError::ApiRequestFailed(e.to_string())
                }
            })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {status}: {text}"
            )));
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        let completion: ChatCompletionResponse = serde_json::from_slice(&raw_bytes).map_err(|e| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&raw_bytes),
                "Failed to parse upstream JSON"
            );
            LlmClientError::InvalidResponse(e.to_string())
        })?;

        Self::parse_completion(completion)
    }
}
