//! bpmn-pulse-core: read-only monitoring queries over a process engine.
//!
//! Defines the engine query surface ([`EngineQuery`]), the metrics snapshot
//! served to the operations dashboard ([`EngineSnapshot`]), the collector
//! that assembles it, and an in-memory engine backend for tests and POC.

pub mod collector;
pub mod memory;
pub mod query;
pub mod snapshot;
pub mod types;

pub use collector::{collect_snapshot, collect_snapshot_at};
pub use memory::MemoryEngine;
pub use query::EngineQuery;
pub use snapshot::EngineSnapshot;
pub use types::{now_ms, ProcessDefinition, Timestamp, DAY_MS};
