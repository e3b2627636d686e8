mod common;

use std::sync::Arc;

use chatbridge::application::services::{
    CompletionService, DEFAULT_VISION_PROMPT, MAX_IMAGE_BYTES, VisionError, VisionService,
    encode_data_uri,
};
use chatbridge::domain::{ContentPart, MessageContent, ModelCatalog};

use common::ScriptedLlmClient;

const VISION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

fn vision(client: &Arc<ScriptedLlmClient>) -> VisionService<ScriptedLlmClient> {
    VisionService::new(Arc::new(CompletionService::new(
        Arc::clone(client),
        Arc::new(ModelCatalog::groq()),
    )))
}

fn sent_parts(client: &ScriptedLlmClient) -> Vec<ContentPart> {
    match &client.requests()[0].messages[0].content {
        MessageContent::Parts(parts) => parts.clone(),
        MessageContent::Text(text) => panic!("expected content parts, got text {text:?}"),
    }
}

#[tokio::test]
async fn given_png_when_describing_then_sends_data_uri_and_tags_vision_mode() {
    let client = Arc::new(ScriptedLlmClient::answering("A red square"));
    let service = vision(&client);

    let completion = service
        .describe(b"\x89PNG", "image/png", "What colour?", VISION_MODEL)
        .await
        .unwrap();

    assert_eq!(completion.content, "A red square");
    assert_eq!(completion.mode.as_deref(), Some("vision"));
    assert_eq!(completion.model, VISION_MODEL);

    let parts = sent_parts(&client);
    assert!(matches!(&parts[0], ContentPart::Text { text } if text == "What colour?"));
    assert!(matches!(
        &parts[1],
        ContentPart::ImageUrl { image_url } if image_url.url == "data:image/png;base64,iVBORw=="
    ));
}

#[tokio::test]
async fn given_blank_prompt_when_describing_then_uses_default_prompt() {
    let client = Arc::new(ScriptedLlmClient::answering("ok"));
    let service = vision(&client);

    service
        .describe(b"GIF89a", "image/gif", "  ", VISION_MODEL)
        .await
        .unwrap();

    let parts = sent_parts(&client);
    assert!(matches!(&parts[0], ContentPart::Text { text } if text == DEFAULT_VISION_PROMPT));
}

#[tokio::test]
async fn given_mime_with_parameters_when_describing_then_normalizes_it() {
    let client = Arc::new(ScriptedLlmClient::answering("ok"));
    let service = vision(&client);

    service
        .describe(b"jpeg", "Image/JPEG; charset=binary", "", VISION_MODEL)
        .await
        .unwrap();

    let parts = sent_parts(&client);
    assert!(matches!(
        &parts[1],
        ContentPart::ImageUrl { image_url } if image_url.url.starts_with("data:image/jpeg;base64,")
    ));
}

#[tokio::test]
async fn given_empty_image_when_describing_then_returns_missing_image() {
    let client = Arc::new(ScriptedLlmClient::answering("unused"));
    let service = vision(&client);

    let result = service.describe(b"", "image/png", "", VISION_MODEL).await;

    assert!(matches!(result, Err(VisionError::MissingImage)));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn given_unsupported_mime_when_describing_then_rejects_without_calling_upstream() {
    let client = Arc::new(ScriptedLlmClient::answering("unused"));
    let service = vision(&client);

    let result = service.describe(b"BM", "image/bmp", "", VISION_MODEL).await;

    assert!(matches!(result, Err(VisionError::UnsupportedImageType(ref m)) if m == "image/bmp"));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn given_oversized_image_when_describing_then_returns_too_large() {
    let client = Arc::new(ScriptedLlmClient::answering("unused"));
    let service = vision(&client);
    let image = vec![0u8; MAX_IMAGE_BYTES + 1];

    let result = service.describe(&image, "image/webp", "", VISION_MODEL).await;

    assert!(matches!(result, Err(VisionError::ImageTooLarge)));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn given_chat_model_when_describing_then_lists_vision_models() {
    let client = Arc::new(ScriptedLlmClient::answering("unused"));
    let service = vision(&client);

    let error = service
        .describe(b"\x89PNG", "image/png", "", "llama3-8b")
        .await
        .unwrap_err();

    assert!(matches!(error, VisionError::UnknownModel { .. }));
    assert!(error.to_string().contains(VISION_MODEL));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn given_upstream_failure_when_describing_then_returns_upstream_error() {
    let client = Arc::new(ScriptedLlmClient::failing());
    let service = vision(&client);

    let result = service
        .describe(b"\x89PNG", "image/png", "", VISION_MODEL)
        .await;

    assert!(matches!(result, Err(VisionError::Upstream(_))));
}

#[test]
fn given_bytes_when_encoding_data_uri_then_uses_standard_base64() {
    assert_eq!(encode_data_uri(b"hello", "image/gif"), "data:image/gif;base64,aGVsbG8=");
}
