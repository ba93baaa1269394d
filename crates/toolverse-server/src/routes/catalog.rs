//! Catalog listing and one-shot search.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use toolverse_search::{match_catalog, SearchQuery};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/catalog", get(get_catalog))
        .route("/search", get(search))
}

/// GET /api/catalog — items grouped by category for the dashboard grid.
async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "categories": state.catalog.by_category(),
        "total": state.catalog.len(),
    }))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// GET /api/search?q= — matches for an already-settled query.
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<serde_json::Value> {
    let query = SearchQuery::new(params.q);
    let results = match_catalog(&query, state.catalog.items()).capped(state.config.result_limit);

    Json(serde_json::json!({
        "query": query.raw(),
        "results": results.items(),
        "total": results.len(),
    }))
}
