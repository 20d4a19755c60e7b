//! Food log entry model.
//!
//! `eating_time` is the moment of eating, not the moment the row was created;
//! all temporal bucketing (peak times, streak ordering) keys off it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodLogEntry {
    pub id: String,
    pub eating_time: DateTime<Utc>,
    pub food_item: String,
    /// Tokens derived from `food_item` by the client; may be empty.
    pub food_items: Vec<String>,
    pub quantity: Option<String>,
    pub meal_type: Option<MealType>,
    /// Emotion label at eating time. `None`, empty, or "neutral" means no
    /// emotional association.
    pub emotion: Option<String>,
    pub hunger_level: Option<u8>,
    pub satisfaction_level: Option<u8>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub mindful_eating: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FoodLogEntry {
    /// Whether this entry counts as emotional eating.
    pub fn is_emotional(&self) -> bool {
        matches!(self.emotion.as_deref(), Some(e) if !e.is_empty() && e != "neutral")
    }
}
