use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::{ChatRequestBody, CompletionParams, validate_chat_request};
use crate::domain::{ChatMode, SynthesisOutcome};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::api_types::ChatResponse;
use super::error::ApiError;

#[tracing::instrument(skip(state, payload))]
pub async fn chat_handler<L, F>(
    State(state): State<AppState<L, F>>,
    payload: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError>
where
    L: LlmClient + 'static,
    F: FileLoader + 'static,
{
    if !state.api_key_configured() {
        return Err(ApiError::configuration());
    }

    let Json(body) = payload.map_err(|e| {
        tracing::warn!(error = %e, "Rejected chat payload");
        ApiError::invalid_json()
    })?;

    let request = validate_chat_request(body, &state.catalog).map_err(ApiError::validation)?;

    tracing::info!(
        model = %request.model,
        mode = %request.mode,
        history_turns = request.conversation_history.len(),
        prompt = %sanitize_prompt(&request.message),
        "Processing chat request"
    );

    let params = CompletionParams::new(&request.message, &request.model)
        .with_context(request.context.as_deref())
        .with_history(&request.conversation_history);

    let result = match request.mode {
        ChatMode::Pro => state
            .synthesis_service
            .run(params)
            .await
            .map(SynthesisOutcome::into_completion),
        ChatMode::Basic => state.completion_service.complete(params).await,
    };

    let completion = result.map_err(|e| {
        tracing::error!(error = %e, "Chat processing error");
        ApiError::internal("Processing error", "Failed to process chat request")
    })?;

    tracing::info!(model = %request.model, "Chat request completed");
    Ok(Json(ChatResponse::from_completion(
        completion,
        request.mode.as_str(),
    )))
}
