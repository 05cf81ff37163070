use crate::query::EngineQuery;
use crate::snapshot::EngineSnapshot;
use crate::types::{now_ms, Timestamp, DAY_MS};
use anyhow::Result;
use std::collections::BTreeMap;

/// Run the fixed query sequence against the engine and assemble the snapshot.
///
/// Read-only; any query failure propagates to the caller unchanged. There is
/// no retry and no partial snapshot.
pub async fn collect_snapshot(engine: &dyn EngineQuery) -> Result<EngineSnapshot> {
    collect_snapshot_at(engine, now_ms()).await
}

/// Same as [`collect_snapshot`] with the poll instant pinned. The "today"
/// window is `now - DAY_MS`, exclusive.
pub async fn collect_snapshot_at(
    engine: &dyn EngineQuery,
    now: Timestamp,
) -> Result<EngineSnapshot> {
    let process_definition_count = engine.definition_count().await?;

    let definitions = engine.list_definitions().await?;
    let deployed_process_definitions: Vec<String> =
        definitions.iter().map(|d| d.label()).collect();

    let mut running_process_instance_count = BTreeMap::new();
    for def in &definitions {
        running_process_instance_count.insert(
            def.label(),
            engine.running_instance_count(&def.definition_id).await?,
        );
    }

    let mut completed_process_instance_count = BTreeMap::new();
    for def in &definitions {
        completed_process_instance_count.insert(
            def.label(),
            engine.finished_instance_count(&def.definition_id).await?,
        );
    }

    let open_task_count = engine.open_task_count().await?;
    let completed_task_count = engine.finished_task_count().await?;
    let completed_task_count_today = engine.finished_task_count_due_after(now - DAY_MS).await?;
    let completed_activities = engine.finished_activity_count().await?;
    let cached_process_definition_count = engine.cached_definition_count().await?;

    tracing::debug!(
        definitions = process_definition_count,
        open_tasks = open_task_count,
        "collected engine snapshot"
    );

    Ok(EngineSnapshot {
        process_definition_count,
        deployed_process_definitions,
        running_process_instance_count,
        completed_process_instance_count,
        open_task_count,
        completed_task_count,
        completed_task_count_today,
        completed_activities,
        cached_process_definition_count,
    })
}
