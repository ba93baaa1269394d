//! HTTP route handlers.

pub mod catalog;
pub mod headlines;
pub mod status;
pub mod wellness;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use serde_json::Value;
use toolverse_core::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(status::routes())
        .merge(catalog::routes())
        .merge(wellness::routes())
        .merge(headlines::routes())
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Busy(_) => StatusCode::CONFLICT,
        Error::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
        e if e.is_retryable() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error body for a failed generation: the user-facing notice plus the cause.
pub(crate) fn generation_error(err: &Error, notice: &str) -> (StatusCode, Json<Value>) {
    let body = match err {
        Error::Busy(_) => serde_json::json!({ "error": err.to_string() }),
        _ => serde_json::json!({ "error": notice, "detail": err.to_string() }),
    };
    (status_for(err), Json(body))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&Error::Busy("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_for(&Error::Http("x".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(&Error::Decode("x".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(&Error::Config("no key".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&Error::Io(std::io::Error::other("disk full"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_generation_error_body() {
        let (status, Json(body)) = generation_error(&Error::Service("quota".into()), "Try later.");
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Try later.");
        assert!(body["detail"].as_str().unwrap().contains("quota"));
    }
}
