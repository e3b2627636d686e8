use std::sync::Arc;

use crate::application::ports::{ChatCompletionRequest, LlmClient, LlmClientError};
use crate::domain::{ChatMessage, Completion, ModelCatalog};

/// Inputs for a single upstream completion.
#[derive(Debug, Clone, Copy)]
pub struct CompletionParams<'a> {
    pub message: &'a str,
    pub model_key: &'a str,
    pub context: Option<&'a str>,
    pub system_prompt: Option<&'a str>,
    pub conversation_history: &'a [ChatMessage],
}

impl<'a> CompletionParams<'a> {
    pub fn new(message: &'a str, model_key: &'a str) -> Self {
        Self {
            message,
            model_key,
            context: None,
            system_prompt: None,
            conversation_history: &[],
        }
    }

    pub fn with_context(mut self, context: Option<&'a str>) -> Self {
        self.context = context;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: &'a str) -> Self {
        self.system_prompt = Some(system_prompt);
        self
    }

    pub fn with_history(mut self, conversation_history: &'a [ChatMessage]) -> Self {
        self.conversation_history = conversation_history;
        self
    }
}

/// Builds message lists, resolves model keys and makes exactly one upstream
/// call per completion.
pub struct CompletionService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    catalog: Arc<ModelCatalog>,
}

impl<L> CompletionService<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>, catalog: Arc<ModelCatalog>) -> Self {
        Self {
            llm_client,
            catalog,
        }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// System prompt, context, history in order, then the user message.
    pub fn build_messages(params: &CompletionParams<'_>) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(params.conversation_history.len() + 3);

        if let Some(system_prompt) = params.system_prompt.filter(|p| !p.is_empty()) {
            messages.push(ChatMessage::system(system_prompt));
        }

        if let Some(context) = params.context.filter(|c| !c.is_empty()) {
            messages.push(ChatMessage::system(format!(
                "Context information: {context}"
            )));
        }

        messages.extend(params.conversation_history.iter().cloned());
        messages.push(ChatMessage::user(params.message));

        messages
    }

    #[tracing::instrument(skip(self, params), fields(model = %params.model_key))]
    pub async fn complete(&self, params: CompletionParams<'_>) -> Result<Completion, UpstreamError> {
        let entry = self
            .catalog
            .get(params.model_key)
            .ok_or_else(|| UpstreamError::UnknownModel(params.model_key.to_string()))?;

        let request = ChatCompletionRequest {
            model: entry.id.clone(),
            messages: Self::build_messages(&params),
        };

        tracing::debug!(
            upstream_model = %entry.id,
            message_count = request.messages.len(),
            "Sending completion request"
        );

        let raw = self.llm_client.chat(request).await?;

        Ok(Completion::new(
            raw.content,
            params.model_key.to_string(),
            raw.usage,
            raw.finish_reason,
        ))
    }

    /// One user message holding the prompt and an inline image.
    #[tracing::instrument(skip(self, prompt, image_data_uri))]
    pub async fn complete_with_image(
        &self,
        prompt: &str,
        image_data_uri: String,
        model_key: &str,
    ) -> Result<Completion, UpstreamError> {
        let entry = self
            .catalog
            .get_vision(model_key)
            .ok_or_else(|| UpstreamError::UnknownModel(model_key.to_string()))?;

        let request = ChatCompletionRequest {
            model: entry.id.clone(),
            messages: vec![ChatMessage::user_with_image(prompt, image_data_uri)],
        };

        let raw = self.llm_client.chat(request).await?;

        Ok(Completion::new(
            raw.content,
            model_key.to_string(),
            raw.usage,
            raw.finish_reason,
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("unknown model: {0}")]
    UnknownModel(String),
    #[error("upstream call failed: {0}")]
    Request(#[from] LlmClientError),
}
