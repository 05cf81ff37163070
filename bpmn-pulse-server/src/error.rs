use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the HTTP layer.
///
/// Engine query failures propagate unhandled out of the collector; this is
/// the single point where they become an HTTP response.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("engine query failed: {0}")]
    Engine(#[from] anyhow::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "monitoring request failed");
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
