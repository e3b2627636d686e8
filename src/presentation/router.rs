use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::MAX_UPLOAD_BYTES;
use crate::infrastructure::observability::request_context_middleware;
use crate::presentation::handlers::{
    analyze_handler, chat_handler, health_handler, models_handler, upload_handler,
    vision_handler,
};
use crate::presentation::state::AppState;

/// Room for multipart framing and text fields on top of the largest upload.
const MULTIPART_OVERHEAD_BYTES: usize = 2 * 1024 * 1024;

pub fn create_router<L, F>(state: AppState<L, F>) -> Router
where
    L: LlmClient + 'static,
    F: FileLoader + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/models", get(models_handler::<L, F>))
        .route("/chat", post(chat_handler::<L, F>))
        .route("/chat/vision", post(vision_handler::<L, F>))
        .route("/upload", post(upload_handler::<L, F>))
        .route("/analyze", post(analyze_handler::<L, F>))
        .layer(DefaultBodyLimit::max(
            MAX_UPLOAD_BYTES as usize + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(middleware::from_fn(request_context_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
