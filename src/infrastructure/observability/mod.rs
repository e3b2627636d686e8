mod init_tracing;
mod prompt_sanitizer;
mod request_context;

pub use init_tracing::init_tracing;
pub use prompt_sanitizer::sanitize_prompt;
pub use request_context::{
    FORWARDED_HOST_HEADER, FORWARDED_PROTO_HEADER, REQUEST_ID_HEADER, RequestContext,
    request_context_middleware,
};
