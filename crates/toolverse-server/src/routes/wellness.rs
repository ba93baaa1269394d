//! Wellness plan routes.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use toolverse_genai::{AssemblyState, Feature, Intensity, WellnessGoal, WellnessInput, WellnessPlan};
use tracing::info;

use super::generation_error;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wellness", get(get_state).post(generate))
        .route("/wellness/options", get(options))
}

/// GET /api/wellness/options — goal and intensity pickers.
async fn options() -> Json<Value> {
    let goals: Vec<Value> = WellnessGoal::ALL
        .iter()
        .map(|g| serde_json::json!({ "id": g.id(), "label": g.label() }))
        .collect();
    let intensities: Vec<String> = Intensity::ALL.iter().map(|i| i.to_string()).collect();
    Json(serde_json::json!({
        "goals": goals,
        "intensities": intensities,
    }))
}

async fn get_state(State(state): State<Arc<AppState>>) -> Json<AssemblyState<WellnessPlan>> {
    Json(state.wellness.state())
}

/// POST /api/wellness — run one plan generation.
async fn generate(
    State(state): State<Arc<AppState>>,
    Json(input): Json<WellnessInput>,
) -> Response {
    info!("Wellness plan requested: {} ({})", input.goal.label(), input.intensity);
    match state.wellness.generate(&input).await {
        Ok(plan) => Json(plan).into_response(),
        Err(e) => generation_error(&e, state.wellness.feature().failure_notice()).into_response(),
    }
}
