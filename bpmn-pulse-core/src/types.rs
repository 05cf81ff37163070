use serde::{Deserialize, Serialize};

// ─── Scalar aliases ───────────────────────────────────────────

/// Epoch milliseconds (UTC).
pub type Timestamp = i64;

/// One day in milliseconds. The dashboard's "today" window is a rolling
/// 24 hours, not a calendar day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

// ─── Process definition ───────────────────────────────────────

/// A deployed process definition, identified by key and version.
///
/// `definition_id` is the engine-assigned id of one deployed version; runtime
/// and historic instance queries are keyed by it. `key` plus `version` is the
/// human-facing identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    pub definition_id: String,
    pub key: String,
    pub version: u32,
    pub name: Option<String>,
    pub deployed_at: Timestamp,
}

impl ProcessDefinition {
    /// Dashboard label: `key (vVersion)`.
    pub fn label(&self) -> String {
        format!("{} (v{})", self.key, self.version)
    }
}
