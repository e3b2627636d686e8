use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::api_types::HealthResponse;

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            message: "Chatbot API is running".to_string(),
        }),
    )
}
