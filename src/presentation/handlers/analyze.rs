use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::{AnalyzeRequestBody, CompletionParams, validate_analyze_request};
use crate::domain::{ChatMode, SynthesisOutcome};
use crate::presentation::state::AppState;

use super::api_types::{AnalyzeResponse, ContentStats, ResponseMetadata};
use super::error::ApiError;

pub const GENERAL_ANALYSIS: &str = "General analysis";

#[tracing::instrument(skip(state, payload))]
pub async fn analyze_handler<L, F>(
    State(state): State<AppState<L, F>>,
    payload: Result<Json<AnalyzeRequestBody>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError>
where
    L: LlmClient + 'static,
    F: FileLoader + 'static,
{
    if !state.api_key_configured() {
        return Err(ApiError::configuration());
    }

    let Json(body) = payload.map_err(|e| {
        tracing::warn!(error = %e, "Rejected analyze payload");
        ApiError::invalid_json()
    })?;

    let request = validate_analyze_request(body, &state.catalog).map_err(ApiError::validation)?;

    let message = match &request.question {
        Some(question) => format!("Based on the provided content, please answer: {question}"),
        None => "Please provide a comprehensive analysis and summary of this content.".to_string(),
    };

    let content_stats = ContentStats::of(&request.content);
    tracing::info!(
        model = %request.model,
        mode = %request.mode,
        content_chars = content_stats.character_count,
        "Analyzing content"
    );

    let params = CompletionParams::new(&message, &request.model).with_context(Some(request.content.as_str()));

    let result = match request.mode {
        ChatMode::Pro => state
            .synthesis_service
            .run(params)
            .await
            .map(SynthesisOutcome::into_completion),
        ChatMode::Basic => state.completion_service.complete(params).await,
    };

    let completion = result.map_err(|e| {
        tracing::error!(error = %e, "Content analysis error");
        ApiError::internal("Analysis error", "Failed to analyze content")
    })?;

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis: completion.content,
        model: completion.model,
        mode: completion
            .mode
            .unwrap_or_else(|| request.mode.as_str().to_string()),
        question: request
            .question
            .unwrap_or_else(|| GENERAL_ANALYSIS.to_string()),
        content_stats,
        usage: completion.usage,
        metadata: ResponseMetadata {
            finish_reason: completion.finish_reason,
            perspectives_analyzed: completion.perspectives_analyzed,
        },
    }))
}
