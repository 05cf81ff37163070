//! In-memory engine backend for testing and POC.
//!
//! `MemoryEngine` is a read-model fixture: it holds deployed definitions,
//! instance and task records, finished-activity history, and a compiled
//! definition cache. The seeding mutators exist so tests and the demo server
//! can shape engine state; they do no orchestration.

use crate::query::EngineQuery;
use crate::types::{now_ms, ProcessDefinition, Timestamp};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// A user task. Open until `finished_at` is set.
#[derive(Clone, Debug)]
struct TaskRecord {
    due_at: Option<Timestamp>,
    finished_at: Option<Timestamp>,
}

#[derive(Default)]
struct EngineState {
    definitions: Vec<ProcessDefinition>,
    /// instance_id → definition_id of running instances.
    running: HashMap<Uuid, String>,
    /// definition_ids of finished instances, append-only history.
    finished: Vec<String>,
    tasks: HashMap<Uuid, TaskRecord>,
    /// (instance_id, activity_id) pairs of finished activity instances.
    activities: Vec<(Uuid, String)>,
    /// definition_id → compiled-at. Stands in for the engine's deployment
    /// cache of compiled definitions.
    cache: HashMap<String, Timestamp>,
}

/// In-memory process engine exposing the [`EngineQuery`] surface.
pub struct MemoryEngine {
    inner: RwLock<EngineState>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(EngineState::default()),
        }
    }

    /// Deploy a new version of a definition. The version auto-bumps per key,
    /// and the compiled definition lands in the deployment cache.
    pub fn deploy(&self, key: &str, name: Option<&str>) -> Result<ProcessDefinition> {
        let mut state = self.inner.write().map_err(|e| anyhow!("Lock: {}", e))?;

        let version = state
            .definitions
            .iter()
            .filter(|d| d.key == key)
            .map(|d| d.version)
            .max()
            .unwrap_or(0)
            + 1;

        let definition = ProcessDefinition {
            definition_id: format!("{key}:{version}:{}", Uuid::now_v7()),
            key: key.to_string(),
            version,
            name: name.map(str::to_string),
            deployed_at: now_ms(),
        };

        state
            .cache
            .insert(definition.definition_id.clone(), definition.deployed_at);
        state.definitions.push(definition.clone());
        Ok(definition)
    }

    /// Start an instance of a deployed definition version.
    pub fn start_instance(&self, definition_id: &str) -> Result<Uuid> {
        let mut state = self.inner.write().map_err(|e| anyhow!("Lock: {}", e))?;

        if !state
            .definitions
            .iter()
            .any(|d| d.definition_id == definition_id)
        {
            bail!("Unknown definition: {definition_id}");
        }

        let instance_id = Uuid::now_v7();
        state.running.insert(instance_id, definition_id.to_string());
        Ok(instance_id)
    }

    /// Move a running instance into finished history.
    pub fn complete_instance(&self, instance_id: Uuid) -> Result<()> {
        let mut state = self.inner.write().map_err(|e| anyhow!("Lock: {}", e))?;

        let definition_id = state
            .running
            .remove(&instance_id)
            .ok_or_else(|| anyhow!("Instance not running: {instance_id}"))?;
        state.finished.push(definition_id);
        Ok(())
    }

    /// Create an open task on a running instance.
    pub fn create_task(&self, instance_id: Uuid, due_at: Option<Timestamp>) -> Result<Uuid> {
        let mut state = self.inner.write().map_err(|e| anyhow!("Lock: {}", e))?;

        if !state.running.contains_key(&instance_id) {
            bail!("Instance not running: {instance_id}");
        }

        let task_id = Uuid::now_v7();
        state.tasks.insert(
            task_id,
            TaskRecord {
                due_at,
                finished_at: None,
            },
        );
        Ok(task_id)
    }

    /// Mark an open task finished.
    pub fn complete_task(&self, task_id: Uuid) -> Result<()> {
        let mut state = self.inner.write().map_err(|e| anyhow!("Lock: {}", e))?;

        let task = state
            .tasks
            .get_mut(&task_id)
            .ok_or_else(|| anyhow!("Unknown task: {task_id}"))?;
        if task.finished_at.is_some() {
            bail!("Task already finished: {task_id}");
        }
        task.finished_at = Some(now_ms());
        Ok(())
    }

    /// Record one finished activity instance for the history counters.
    pub fn record_completed_activity(&self, instance_id: Uuid, activity_id: &str) -> Result<()> {
        let mut state = self.inner.write().map_err(|e| anyhow!("Lock: {}", e))?;
        state.activities.push((instance_id, activity_id.to_string()));
        Ok(())
    }

    /// Drop a compiled definition from the deployment cache. The definition
    /// itself stays deployed.
    pub fn evict_cached_definition(&self, definition_id: &str) -> Result<()> {
        let mut state = self.inner.write().map_err(|e| anyhow!("Lock: {}", e))?;
        state
            .cache
            .remove(definition_id)
            .ok_or_else(|| anyhow!("Not cached: {definition_id}"))?;
        Ok(())
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EngineQuery for MemoryEngine {
    async fn definition_count(&self) -> Result<i64> {
        let state = self.inner.read().map_err(|e| anyhow!("Lock: {}", e))?;
        Ok(state.definitions.len() as i64)
    }

    async fn list_definitions(&self) -> Result<Vec<ProcessDefinition>> {
        let state = self.inner.read().map_err(|e| anyhow!("Lock: {}", e))?;
        let mut definitions = state.definitions.clone();
        definitions.sort_by(|a, b| a.key.cmp(&b.key).then(a.version.cmp(&b.version)));
        Ok(definitions)
    }

    async fn running_instance_count(&self, definition_id: &str) -> Result<i64> {
        let state = self.inner.read().map_err(|e| anyhow!("Lock: {}", e))?;
        Ok(state
            .running
            .values()
            .filter(|d| d.as_str() == definition_id)
            .count() as i64)
    }

    async fn open_task_count(&self) -> Result<i64> {
        let state = self.inner.read().map_err(|e| anyhow!("Lock: {}", e))?;
        Ok(state
            .tasks
            .values()
            .filter(|t| t.finished_at.is_none())
            .count() as i64)
    }

    async fn finished_instance_count(&self, definition_id: &str) -> Result<i64> {
        let state = self.inner.read().map_err(|e| anyhow!("Lock: {}", e))?;
        Ok(state
            .finished
            .iter()
            .filter(|d| d.as_str() == definition_id)
            .count() as i64)
    }

    async fn finished_task_count(&self) -> Result<i64> {
        let state = self.inner.read().map_err(|e| anyhow!("Lock: {}", e))?;
        Ok(state
            .tasks
            .values()
            .filter(|t| t.finished_at.is_some())
            .count() as i64)
    }

    async fn finished_task_count_due_after(&self, due_after: Timestamp) -> Result<i64> {
        let state = self.inner.read().map_err(|e| anyhow!("Lock: {}", e))?;
        Ok(state
            .tasks
            .values()
            .filter(|t| t.finished_at.is_some() && t.due_at.is_some_and(|due| due > due_after))
            .count() as i64)
    }

    async fn finished_activity_count(&self) -> Result<i64> {
        let state = self.inner.read().map_err(|e| anyhow!("Lock: {}", e))?;
        Ok(state.activities.len() as i64)
    }

    async fn cached_definition_count(&self) -> Result<Option<usize>> {
        let state = self.inner.read().map_err(|e| anyhow!("Lock: {}", e))?;
        Ok(Some(state.cache.len()))
    }
}
