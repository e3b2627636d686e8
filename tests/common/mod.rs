#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::json;

use chatbridge::application::ports::{
    ChatCompletionRequest, FileLoader, FileLoaderError, LlmClient, LlmClientError, RawCompletion,
};
use chatbridge::domain::{ModelCatalog, Upload};
use chatbridge::presentation::config::{
    LoggingSettings, ServerSettings, SessionSettings, Settings, SynthesisSettings,
    UpstreamSettings,
};
use chatbridge::presentation::{AppState, create_router};

pub const TEST_API_KEY: &str = "gsk_test_key_0123456789abcdef";

type Responder = dyn Fn(&ChatCompletionRequest) -> Result<RawCompletion, LlmClientError> + Send + Sync;

/// LLM client whose answers are decided per request; every request is recorded.
pub struct ScriptedLlmClient {
    responder: Box<Responder>,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl ScriptedLlmClient {
    pub fn new<R>(responder: R) -> Self
    where
        R: Fn(&ChatCompletionRequest) -> Result<RawCompletion, LlmClientError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers every request with the given text.
    pub fn answering(content: &str) -> Self {
        let content = content.to_string();
        Self::new(move |_| Ok(completion(&content)))
    }

    /// Fails every request.
    pub fn failing() -> Self {
        Self::new(|_| Err(LlmClientError::ApiRequestFailed("HTTP 500: boom".to_string())))
    }

    pub fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn chat(&self, request: ChatCompletionRequest) -> Result<RawCompletion, LlmClientError> {
        let result = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        result
    }
}

pub fn completion(content: &str) -> RawCompletion {
    RawCompletion {
        content: content.to_string(),
        usage: json!({"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}),
        finish_reason: Some("stop".to_string()),
    }
}

/// Text of the last (user) message of a request.
pub fn last_user_text(request: &ChatCompletionRequest) -> String {
    request
        .messages
        .last()
        .map(|m| m.text())
        .unwrap_or_default()
}

/// Text of the first system message of a request.
pub fn system_text(request: &ChatCompletionRequest) -> String {
    request
        .messages
        .first()
        .map(|m| m.text())
        .unwrap_or_default()
}

pub struct Utf8FileLoader;

#[async_trait::async_trait]
impl FileLoader for Utf8FileLoader {
    async fn extract_text(&self, data: &[u8], _upload: &Upload) -> Result<String, FileLoaderError> {
        String::from_utf8(data.to_vec()).map_err(|_| FileLoaderError::InvalidEncoding)
    }
}

pub fn test_settings(api_key: Option<&str>) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        upstream: UpstreamSettings {
            api_url: "http://localhost:9/openai/v1/chat/completions".to_string(),
            api_key: api_key.map(str::to_string),
            timeout_secs: 30,
            temperature: 0.7,
            max_tokens: 1000,
        },
        session: SessionSettings {
            secret: "test-secret".to_string(),
        },
        logging: LoggingSettings {
            level: "info".to_string(),
            json_format: false,
        },
        synthesis: SynthesisSettings {
            response_language: "English".to_string(),
        },
    }
}

pub fn test_state(
    llm_client: Arc<ScriptedLlmClient>,
    api_key: Option<&str>,
) -> AppState<ScriptedLlmClient, Utf8FileLoader> {
    AppState::new(
        llm_client,
        Arc::new(Utf8FileLoader),
        Arc::new(ModelCatalog::groq()),
        &test_settings(api_key),
    )
}

pub fn create_test_app(llm_client: Arc<ScriptedLlmClient>) -> axum::Router {
    create_router(test_state(llm_client, Some(TEST_API_KEY)))
}
