//! Headline routes.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use toolverse_genai::{AssemblyState, Feature, HeadlineInput, HeadlineList};

use super::generation_error;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/headlines", get(get_state).post(refresh))
}

async fn get_state(State(state): State<Arc<AppState>>) -> Json<AssemblyState<HeadlineList>> {
    Json(state.headlines.state())
}

/// POST /api/headlines — refresh. Body `{ "topic": ... }` is optional.
async fn refresh(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let input: HeadlineInput = if body.iter().all(u8::is_ascii_whitespace) {
        HeadlineInput::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(input) => input,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": format!("Invalid body: {}", e) })),
                )
                    .into_response();
            }
        }
    };

    match state.headlines.generate(&input).await {
        Ok(list) => Json(list).into_response(),
        Err(e) => generation_error(&e, state.headlines.feature().failure_notice()).into_response(),
    }
}
