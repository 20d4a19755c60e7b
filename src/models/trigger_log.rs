use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mood/trigger journal entry. `triggers` keeps the order the client sent;
/// trigger ranking relies on it for deterministic tie-breaks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub mood: String,
    pub triggers: Vec<String>,
    pub intensity: Option<u8>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
