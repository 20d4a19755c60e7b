use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed use of a coping tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolUsageEntry {
    pub id: String,
    pub tool_name: String,
    pub used_at: DateTime<Utc>,
}
