mod completion_service;
mod document_service;
mod request_validator;
mod synthesis_service;
mod vision_service;

pub use completion_service::{CompletionParams, CompletionService, UpstreamError};
pub use document_service::{DocumentService, FileError, MAX_UPLOAD_BYTES};
pub use request_validator::{
    AnalyzeRequest, AnalyzeRequestBody, ChatRequest, ChatRequestBody, MAX_ANALYZE_CONTENT_CHARS,
    MAX_CONTEXT_CHARS, MAX_MESSAGE_CHARS, MIN_API_KEY_CHARS, ValidationError,
    api_key_is_plausible, invalid_model_message, resolve_model, sanitize_filename,
    validate_analyze_request, validate_chat_request,
};
pub use synthesis_service::{
    SynthesisError, SynthesisService, perspective_prompts, render_history_recap,
    synthesis_prompt,
};
pub use vision_service::{
    DEFAULT_VISION_PROMPT, MAX_IMAGE_BYTES, VISION_MODE, VisionError, VisionService,
    encode_data_uri,
};
