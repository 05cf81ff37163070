use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The metrics snapshot served to the operations dashboard.
///
/// Built fresh on every poll. Wire keys are the fixed camelCase set the
/// dashboard binds to; per-definition mappings are keyed by the
/// `key (vVersion)` label and stay ordered. `cachedProcessDefinitionCount`
/// is omitted entirely when the engine's deployment cache cannot be
/// introspected.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub process_definition_count: i64,
    pub deployed_process_definitions: Vec<String>,
    pub running_process_instance_count: BTreeMap<String, i64>,
    pub completed_process_instance_count: BTreeMap<String, i64>,
    pub open_task_count: i64,
    pub completed_task_count: i64,
    pub completed_task_count_today: i64,
    pub completed_activities: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_process_definition_count: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot(cache: Option<usize>) -> EngineSnapshot {
        let mut running = BTreeMap::new();
        running.insert("invoice (v1)".to_string(), 2);
        let mut completed = BTreeMap::new();
        completed.insert("invoice (v1)".to_string(), 5);

        EngineSnapshot {
            process_definition_count: 1,
            deployed_process_definitions: vec!["invoice (v1)".to_string()],
            running_process_instance_count: running,
            completed_process_instance_count: completed,
            open_task_count: 3,
            completed_task_count: 7,
            completed_task_count_today: 4,
            completed_activities: 11,
            cached_process_definition_count: cache,
        }
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let json = serde_json::to_value(sample_snapshot(Some(1))).unwrap();
        let obj = json.as_object().expect("snapshot serializes to an object");

        let expected = [
            "processDefinitionCount",
            "deployedProcessDefinitions",
            "runningProcessInstanceCount",
            "completedProcessInstanceCount",
            "openTaskCount",
            "completedTaskCount",
            "completedTaskCountToday",
            "completedActivities",
            "cachedProcessDefinitionCount",
        ];
        assert_eq!(obj.len(), expected.len());
        for key in expected {
            assert!(obj.contains_key(key), "missing wire key {key}");
        }
    }

    #[test]
    fn test_cache_key_omitted_when_not_introspectable() {
        let json = serde_json::to_value(sample_snapshot(None)).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        assert!(!obj.contains_key("cachedProcessDefinitionCount"));
    }

    #[test]
    fn test_round_trip_preserves_counts() {
        let json = serde_json::to_string(&sample_snapshot(Some(2))).unwrap();
        let parsed: EngineSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.process_definition_count, 1);
        assert_eq!(parsed.open_task_count, 3);
        assert_eq!(parsed.cached_process_definition_count, Some(2));
        assert_eq!(
            parsed.running_process_instance_count.get("invoice (v1)"),
            Some(&2)
        );
    }
}
