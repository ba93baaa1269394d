//! Health and generative configuration status.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use toolverse_genai::GenAIStatus;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/genai/status", get(genai_status))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "catalogItems": state.catalog.len(),
    }))
}

/// GET /api/genai/status — key presence and model names, never the key.
async fn genai_status(State(state): State<Arc<AppState>>) -> Json<GenAIStatus> {
    Json(state.genai_config.to_status())
}
