use crate::types::{ProcessDefinition, Timestamp};
use anyhow::Result;
use async_trait::async_trait;

/// Read-only query surface of a running process engine.
///
/// Methods organized by concern, mirroring the engine's query services
/// (repository, runtime, task, history) plus the deployment cache. The
/// collector operates exclusively through this trait, enabling pluggable
/// backends (MemoryEngine for POC, a live engine client in production).
///
/// Every method is a point-in-time read; the trait exposes no mutation.
#[async_trait]
pub trait EngineQuery: Send + Sync {
    // ── Repository ──

    /// Total number of deployed process definitions, across all versions.
    async fn definition_count(&self) -> Result<i64>;

    /// All deployed definitions, ordered by key ascending and version
    /// ascending within a key.
    async fn list_definitions(&self) -> Result<Vec<ProcessDefinition>>;

    // ── Runtime ──

    /// Running process instances of one deployed definition version.
    async fn running_instance_count(&self, definition_id: &str) -> Result<i64>;

    // ── Tasks ──

    /// Open (not yet completed) tasks across all instances.
    async fn open_task_count(&self) -> Result<i64>;

    // ── History ──

    /// Finished process instances of one deployed definition version.
    async fn finished_instance_count(&self, definition_id: &str) -> Result<i64>;

    /// Finished tasks across all instances, all time.
    async fn finished_task_count(&self) -> Result<i64>;

    /// Finished tasks whose due date is strictly after `due_after`.
    /// Tasks without a due date never match.
    async fn finished_task_count_due_after(&self, due_after: Timestamp) -> Result<i64>;

    /// Finished activity instances across all instances, all time.
    async fn finished_activity_count(&self) -> Result<i64>;

    // ── Deployment cache ──

    /// Number of compiled definitions currently held in the engine's
    /// deployment cache, or `None` when the cache is not introspectable.
    async fn cached_definition_count(&self) -> Result<Option<usize>>;
}
