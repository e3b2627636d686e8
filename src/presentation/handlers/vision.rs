use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::{VISION_MODE, VisionError};
use crate::presentation::state::AppState;

use super::api_types::ChatResponse;
use super::error::ApiError;
use super::multipart_form::read_form;

#[tracing::instrument(skip(state, multipart))]
pub async fn vision_handler<L, F>(
    State(state): State<AppState<L, F>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ChatResponse>, ApiError>
where
    L: LlmClient + 'static,
    F: FileLoader + 'static,
{
    if !state.api_key_configured() {
        return Err(ApiError::configuration());
    }

    let form = read_form(multipart, "image").await?;

    let Some(image) = &form.file else {
        return Err(ApiError::bad_request("No image provided", "Please upload an image"));
    };

    let mime_type = image
        .content_type
        .clone()
        .or_else(|| mime_from_filename(&image.filename).map(str::to_string))
        .unwrap_or_default();
    let prompt = form.text("message").unwrap_or_default();
    let model = form
        .text("model")
        .unwrap_or(state.catalog.default_vision_model())
        .to_string();

    tracing::info!(
        model = %model,
        mime_type = %mime_type,
        bytes = image.bytes.len(),
        "Processing vision request"
    );

    let completion = state
        .vision_service
        .describe(&image.bytes, &mime_type, prompt, &model)
        .await
        .map_err(|e| match e {
            VisionError::Upstream(cause) => {
                tracing::error!(error = %cause, "Vision processing error");
                ApiError::internal("Processing error", "Failed to process image")
            }
            unknown @ VisionError::UnknownModel { .. } => {
                tracing::warn!(error = %unknown, "Rejected vision model");
                ApiError::bad_request("Invalid model", unknown.to_string())
            }
            other => {
                tracing::warn!(error = %other, "Rejected image");
                ApiError::bad_request("Invalid image", other.to_string())
            }
        })?;

    Ok(Json(ChatResponse::from_completion(completion, VISION_MODE)))
}

fn mime_from_filename(filename: &str) -> Option<&'static str> {
    let (_, extension) = filename.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
