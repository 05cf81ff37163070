//! Router assembly. The monitoring route is registered only when the
//! endpoint is enabled in config; the trace and CORS layers always apply.

use crate::config::PulseConfig;
use crate::error::ServerError;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use bpmn_pulse_core::{collect_snapshot, EngineQuery, EngineSnapshot};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn EngineQuery>,
}

pub fn build_router(state: AppState, config: &PulseConfig) -> Router {
    let mut router = Router::new().route("/health", get(health));

    if config.endpoint.enabled {
        let path = format!("/monitoring/{}", config.endpoint.id);
        router = router.route(&path, get(engine_snapshot));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// One dashboard poll: run the fixed query sequence and return the snapshot.
async fn engine_snapshot(
    State(state): State<AppState>,
) -> Result<Json<EngineSnapshot>, ServerError> {
    let snapshot = collect_snapshot(state.engine.as_ref()).await?;
    Ok(Json(snapshot))
}
