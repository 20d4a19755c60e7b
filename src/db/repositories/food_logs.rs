use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{
    helpers::{parse_datetime, parse_meal_type, parse_string_list, to_json_list, to_opt_u8},
    Database,
};
use crate::models::FoodLogEntry;

fn row_to_food_log(row: &Row) -> Result<FoodLogEntry> {
    let eating_time: String = row.get("eating_time")?;
    let food_items: String = row.get("food_items")?;
    let meal_type: Option<String> = row.get("meal_type")?;
    let hunger_level: Option<i64> = row.get("hunger_level")?;
    let satisfaction_level: Option<i64> = row.get("satisfaction_level")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(FoodLogEntry {
        id: row.get("id")?,
        eating_time: parse_datetime(&eating_time, "eating_time")?,
        food_item: row.get("food_item")?,
        food_items: parse_string_list(&food_items, "food_items")?,
        quantity: row.get("quantity")?,
        meal_type: parse_meal_type(meal_type)?,
        emotion: row.get("emotion")?,
        hunger_level: to_opt_u8(hunger_level, "hunger_level")?,
        satisfaction_level: to_opt_u8(satisfaction_level, "satisfaction_level")?,
        location: row.get("location")?,
        company: row.get("company")?,
        notes: row.get("notes")?,
        mindful_eating: row.get("mindful_eating")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    pub async fn insert_food_log(&self, user_id: &str, entry: &FoodLogEntry) -> Result<()> {
        let user_id = user_id.to_string();
        let record = entry.clone();
        self.execute(move |conn| {
            let food_items = to_json_list(&record.food_items)?;
            conn.execute(
                "INSERT INTO food_logs (id, user_id, eating_time, food_item, food_items, quantity,
                                        meal_type, emotion, hunger_level, satisfaction_level,
                                        location, company, notes, mindful_eating, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                params![
                    record.id,
                    user_id,
                    record.eating_time.to_rfc3339(),
                    record.food_item,
                    food_items,
                    record.quantity,
                    record.meal_type.map(|m| m.as_str()),
                    record.emotion,
                    record.hunger_level.map(i64::from),
                    record.satisfaction_level.map(i64::from),
                    record.location,
                    record.company,
                    record.notes,
                    record.mindful_eating,
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )
            .context("failed to insert food log")?;
            Ok(())
        })
        .await
    }

    pub async fn update_food_log(&self, user_id: &str, entry: &FoodLogEntry) -> Result<()> {
        let user_id = user_id.to_string();
        let record = entry.clone();
        self.execute(move |conn| {
            let food_items = to_json_list(&record.food_items)?;
            conn.execute(
                "UPDATE food_logs
                 SET eating_time = ?1,
                     food_item = ?2,
                     food_items = ?3,
                     quantity = ?4,
                     meal_type = ?5,
                     emotion = ?6,
                     hunger_level = ?7,
                     satisfaction_level = ?8,
                     location = ?9,
                     company = ?10,
                     notes = ?11,
                     mindful_eating = ?12,
                     updated_at = ?13
                 WHERE id = ?14 AND user_id = ?15",
                params![
                    record.eating_time.to_rfc3339(),
                    record.food_item,
                    food_items,
                    record.quantity,
                    record.meal_type.map(|m| m.as_str()),
                    record.emotion,
                    record.hunger_level.map(i64::from),
                    record.satisfaction_level.map(i64::from),
                    record.location,
                    record.company,
                    record.notes,
                    record.mindful_eating,
                    record.updated_at.to_rfc3339(),
                    record.id,
                    user_id,
                ],
            )
            .context("failed to update food log")?;
            Ok(())
        })
        .await
    }

    pub async fn delete_food_log(&self, user_id: &str, id: &str) -> Result<()> {
        let user_id = user_id.to_string();
        let id = id.to_string();
        self.execute(move |conn| {
            conn.execute(
                "DELETE FROM food_logs WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )
            .context("failed to delete food log")?;
            Ok(())
        })
        .await
    }

    /// All food logs for a user, newest eating time first.
    pub async fn list_food_logs(&self, user_id: &str) -> Result<Vec<FoodLogEntry>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, eating_time, food_item, food_items, quantity, meal_type, emotion,
                        hunger_level, satisfaction_level, location, company, notes,
                        mindful_eating, created_at, updated_at
                 FROM food_logs
                 WHERE user_id = ?1
                 ORDER BY eating_time DESC",
            )?;

            let mut rows = stmt.query(params![user_id])?;
            let mut entries = Vec::new();
            while let Some(row) = rows.next()? {
                entries.push(row_to_food_log(row)?);
            }
            Ok(entries)
        })
        .await
    }
}
