use std::convert::TryFrom;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

use crate::models::MealType;

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn to_opt_u8(value: Option<i64>, field: &str) -> Result<Option<u8>> {
    value
        .map(|raw| {
            u8::try_from(raw).map_err(|_| anyhow!("{field} value {raw} is out of range"))
        })
        .transpose()
}

pub fn parse_meal_type(value: Option<String>) -> Result<Option<MealType>> {
    match value.as_deref() {
        None => Ok(None),
        Some("breakfast") => Ok(Some(MealType::Breakfast)),
        Some("lunch") => Ok(Some(MealType::Lunch)),
        Some("dinner") => Ok(Some(MealType::Dinner)),
        Some("snack") => Ok(Some(MealType::Snack)),
        Some(other) => Err(anyhow!("unknown meal type '{other}'")),
    }
}

/// JSON-array TEXT columns (`food_items`, `triggers`).
pub fn parse_string_list(value: &str, field: &str) -> Result<Vec<String>> {
    serde_json::from_str(value).with_context(|| format!("failed to parse {field}"))
}

pub fn to_json_list(values: &[String]) -> Result<String> {
    serde_json::to_string(values).context("failed to encode string list")
}
