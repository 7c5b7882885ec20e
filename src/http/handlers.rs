//! Request handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::health::HealthCheckTarget;
use crate::http::server::AppState;

/// `POST /health-check`: probe every URL in the JSON array body.
///
/// A body that is not a JSON array of strings is rejected with 400 before any
/// probe is dispatched.
pub async fn health_check_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let targets: Vec<HealthCheckTarget> = match serde_json::from_slice(&body) {
        Ok(targets) => targets,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting malformed health check request");
            return (StatusCode::BAD_REQUEST, "Invalid request").into_response();
        }
    };

    let results = state.checker.check_all(targets).await;
    Json(results).into_response()
}
