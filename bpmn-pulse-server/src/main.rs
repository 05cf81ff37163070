//! bpmn-pulse server: serves the engine metrics snapshot for the operations
//! dashboard.
//!
//! - Monitoring endpoint: GET /monitoring/{endpoint.id}
//! - Liveness: GET /health
//! - Backend: in-memory engine (POC); set PULSE_SEED_DEMO=1 for sample data

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use bpmn_pulse_core::{now_ms, MemoryEngine};
use bpmn_pulse_server::config::PulseConfig;
use bpmn_pulse_server::routes::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("bpmn_pulse_server=info,bpmn_pulse_core=info,tower_http=info")
        }))
        .init();

    dotenvy::dotenv().ok();

    let config = PulseConfig::load()?;
    let listen: SocketAddr = config.listen_addr()?;

    let engine = Arc::new(MemoryEngine::new());
    if std::env::var("PULSE_SEED_DEMO").is_ok() {
        seed_demo(&engine)?;
        tracing::info!("seeded demo engine state");
    }

    let state = AppState { engine };
    let app = build_router(state, &config);

    tracing::info!(%listen, endpoint = %config.endpoint.id, enabled = config.endpoint.enabled, "bpmn-pulse starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// A small, plausible engine population so the endpoint has something to show.
fn seed_demo(engine: &MemoryEngine) -> anyhow::Result<()> {
    let invoice = engine.deploy("invoice", Some("Invoice processing"))?;
    let onboarding = engine.deploy("onboarding", Some("Client onboarding"))?;

    for _ in 0..3 {
        engine.start_instance(&invoice.definition_id)?;
    }

    let running = engine.start_instance(&onboarding.definition_id)?;
    engine.create_task(running, Some(now_ms() + 3_600_000))?;

    let done = engine.start_instance(&onboarding.definition_id)?;
    let review = engine.create_task(done, Some(now_ms()))?;
    engine.complete_task(review)?;
    engine.record_completed_activity(done, "review_documents")?;
    engine.record_completed_activity(done, "approve_client")?;
    engine.complete_instance(done)?;

    Ok(())
}
