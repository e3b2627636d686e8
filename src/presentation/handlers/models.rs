use axum::Json;
use axum::extract::State;

use crate::application::ports::{FileLoader, LlmClient};
use crate::presentation::state::AppState;

use super::api_types::ModelsResponse;

pub async fn models_handler<L, F>(State(state): State<AppState<L, F>>) -> Json<ModelsResponse>
where
    L: LlmClient + 'static,
    F: FileLoader + 'static,
{
    Json(ModelsResponse::from_catalog(&state.catalog))
}
