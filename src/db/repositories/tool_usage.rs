use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{helpers::parse_datetime, Database};
use crate::models::ToolUsageEntry;

fn row_to_tool_usage(row: &Row) -> Result<ToolUsageEntry> {
    let used_at: String = row.get("used_at")?;

    Ok(ToolUsageEntry {
        id: row.get("id")?,
        tool_name: row.get("tool_name")?,
        used_at: parse_datetime(&used_at, "used_at")?,
    })
}

impl Database {
    /// Record one completed tool use and return the stored row.
    pub async fn append_tool_usage(
        &self,
        user_id: &str,
        tool_name: &str,
        used_at: DateTime<Utc>,
    ) -> Result<ToolUsageEntry> {
        let entry = ToolUsageEntry {
            id: Uuid::new_v4().to_string(),
            tool_name: tool_name.to_string(),
            used_at,
        };

        let user_id = user_id.to_string();
        let record = entry.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO tool_usage (id, user_id, tool_name, used_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.id,
                    user_id,
                    record.tool_name,
                    record.used_at.to_rfc3339(),
                ],
            )
            .context("failed to insert tool usage")?;
            Ok(())
        })
        .await?;

        Ok(entry)
    }

    /// All tool usage for a user, newest first.
    pub async fn list_tool_usage(&self, user_id: &str) -> Result<Vec<ToolUsageEntry>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, tool_name, used_at
                 FROM tool_usage
                 WHERE user_id = ?1
                 ORDER BY used_at DESC",
            )?;

            let mut rows = stmt.query(params![user_id])?;
            let mut entries = Vec::new();
            while let Some(row) = rows.next()? {
                entries.push(row_to_tool_usage(row)?);
            }
            Ok(entries)
        })
        .await
    }
}
