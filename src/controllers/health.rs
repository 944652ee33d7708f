use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::pipeline::PipelineService;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness: which voices are installed and which engines are warm.
pub async fn health_ready(State(service): State<Arc<PipelineService>>) -> impl IntoResponse {
    let installed: Vec<String> = service
        .engines()
        .locator()
        .list_installed()
        .into_iter()
        .map(|asset| asset.language)
        .collect();
    let cached = service.engines().cached_languages();

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "voices": installed,
            "engines_cached": cached,
        })),
    )
}
