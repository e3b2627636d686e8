use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose};

use crate::application::ports::LlmClient;
use crate::domain::Completion;

use super::completion_service::{CompletionService, UpstreamError};

pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_VISION_PROMPT: &str = "Describe this image in detail.";
pub const VISION_MODE: &str = "vision";

const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Single-call image description through a vision-capable model.
pub struct VisionService<L>
where
    L: LlmClient,
{
    completion_service: Arc<CompletionService<L>>,
}

impl<L> VisionService<L>
where
    L: LlmClient,
{
    pub fn new(completion_service: Arc<CompletionService<L>>) -> Self {
        Self { completion_service }
    }

    #[tracing::instrument(skip(self, image, prompt), fields(bytes = image.len()))]
    pub async fn describe(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
        model_key: &str,
    ) -> Result<Completion, VisionError> {
        if image.is_empty() {
            return Err(VisionError::MissingImage);
        }

        let mime_type = normalize_mime(mime_type);
        if !ALLOWED_IMAGE_TYPES.contains(&mime_type.as_str()) {
            return Err(VisionError::UnsupportedImageType(mime_type));
        }

        if image.len() > MAX_IMAGE_BYTES {
            return Err(VisionError::ImageTooLarge);
        }

        let catalog = self.completion_service.catalog();
        if catalog.get_vision(model_key).is_none() {
            return Err(VisionError::UnknownModel {
                available: catalog.vision_keys().join(", "),
            });
        }

        let prompt = match prompt.trim() {
            "" => DEFAULT_VISION_PROMPT,
            p => p,
        };

        let completion = self
            .completion_service
            .complete_with_image(prompt, encode_data_uri(image, &mime_type), model_key)
            .await?;

        Ok(completion.with_mode(VISION_MODE))
    }
}

pub fn encode_data_uri(bytes: &[u8], mime_type: &str) -> String {
    format!(
        "data:{mime_type};base64,{}",
        general_purpose::STANDARD.encode(bytes)
    )
}

fn normalize_mime(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("No image provided")]
    MissingImage,
    #[error("Unsupported image type: {0}. Supported types: jpeg, png, gif, webp")]
    UnsupportedImageType(String),
    #[error("Image too large. Maximum size: 10.0MB")]
    ImageTooLarge,
    #[error("Invalid vision model. Available models: [{available}]")]
    UnknownModel { available: String },
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
