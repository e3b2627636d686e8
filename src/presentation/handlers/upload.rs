use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::{CompletionParams, FileError, resolve_model};
use crate::presentation::state::AppState;

use super::analyze::GENERAL_ANALYSIS;
use super::api_types::{AiAnalysis, FileInfoResponse, UploadResponse, content_preview};
use super::error::ApiError;
use super::multipart_form::read_form;

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<L, F>(
    State(state): State<AppState<L, F>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError>
where
    L: LlmClient + 'static,
    F: FileLoader + 'static,
{
    let form = read_form(multipart, "file").await?;

    let Some(file) = &form.file else {
        return Err(ApiError::bad_request("No file provided", "Please upload a file"));
    };

    tracing::info!(filename = %file.filename, bytes = file.bytes.len(), "Processing uploaded file");

    let file_info = state
        .document_service
        .extract(&file.bytes, &file.filename)
        .await
        .map_err(|e: FileError| {
            tracing::warn!(error = %e, "File processing validation error");
            ApiError::bad_request("File processing error", e.to_string())
        })?;

    let mut response = UploadResponse {
        success: true,
        file_info: FileInfoResponse::from(&file_info),
        content_preview: content_preview(&file_info.content),
        ai_analysis: None,
    };

    if form.flag("process_with_ai") {
        if !state.api_key_configured() {
            return Err(ApiError::configuration());
        }

        let model = resolve_model(form.text("model").map(str::to_string), &state.catalog)
            .map_err(|e| ApiError::bad_request("Invalid model", e.to_string()))?;

        let question = form.text("question");
        let message = match question {
            Some(question) => format!("Based on the uploaded document, please answer: {question}"),
            None => "Please provide a comprehensive summary and analysis of this document."
                .to_string(),
        };

        tracing::info!(model = %model, "Processing file with AI");

        let completion = state
            .completion_service
            .complete(CompletionParams::new(&message, &model).with_context(Some(file_info.content.as_str())))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "File upload processing error");
                ApiError::internal("Upload processing error", "Failed to process uploaded file")
            })?;

        response.ai_analysis = Some(AiAnalysis {
            response: completion.content,
            model: completion.model,
            question: question.unwrap_or(GENERAL_ANALYSIS).to_string(),
            usage: completion.usage,
        });
    }

    tracing::info!(filename = %file_info.filename, "File upload processed");
    Ok(Json(response))
}
