use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{
    helpers::{parse_datetime, parse_string_list, to_json_list, to_opt_u8},
    Database,
};
use crate::models::TriggerLogEntry;

fn row_to_trigger_log(row: &Row) -> Result<TriggerLogEntry> {
    let timestamp: String = row.get("timestamp")?;
    let triggers: String = row.get("triggers")?;
    let intensity: Option<i64> = row.get("intensity")?;
    let created_at: String = row.get("created_at")?;

    Ok(TriggerLogEntry {
        id: row.get("id")?,
        timestamp: parse_datetime(&timestamp, "timestamp")?,
        mood: row.get("mood")?,
        triggers: parse_string_list(&triggers, "triggers")?,
        intensity: to_opt_u8(intensity, "intensity")?,
        notes: row.get("notes")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    pub async fn insert_trigger_log(&self, user_id: &str, entry: &TriggerLogEntry) -> Result<()> {
        let user_id = user_id.to_string();
        let record = entry.clone();
        self.execute(move |conn| {
            let triggers = to_json_list(&record.triggers)?;
            conn.execute(
                "INSERT INTO trigger_logs (id, user_id, timestamp, mood, triggers, intensity, notes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id,
                    user_id,
                    record.timestamp.to_rfc3339(),
                    record.mood,
                    triggers,
                    record.intensity.map(i64::from),
                    record.notes,
                    record.created_at.to_rfc3339(),
                ],
            )
            .context("failed to insert trigger log")?;
            Ok(())
        })
        .await
    }

    /// All trigger logs for a user, newest first.
    pub async fn list_trigger_logs(&self, user_id: &str) -> Result<Vec<TriggerLogEntry>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, timestamp, mood, triggers, intensity, notes, created_at
                 FROM trigger_logs
                 WHERE user_id = ?1
                 ORDER BY timestamp DESC",
            )?;

            let mut rows = stmt.query(params![user_id])?;
            let mut entries = Vec::new();
            while let Some(row) = rows.next()? {
                entries.push(row_to_trigger_log(row)?);
            }
            Ok(entries)
        })
        .await
    }
}
