//! Analyzer output types. All of these are derived value objects, recomputed
//! on demand and never persisted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
        }
    }

    /// Bucket an hour of day: Morning [5,12), Afternoon [12,17), Evening
    /// everything else (17-23 and the overnight hours 0-4).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeSlot::Morning,
            12..=16 => TimeSlot::Afternoon,
            _ => TimeSlot::Evening,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerCount {
    pub trigger: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeakTime {
    pub time_slot: TimeSlot,
    pub count: u32,
}

/// Most frequent food token for one mood.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodFoodConnection {
    pub mood: String,
    pub food: String,
    pub frequency: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TrendKind {
    Improvement,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressIndicator {
    pub kind: TrendKind,
    pub message: String,
    /// Percentage-point change in emotional-eating proportion, recent window
    /// minus older window. Negative is improvement.
    pub change_pct: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    pub message: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DerivedInsights {
    /// Percentage of food logs carrying a non-neutral emotion, 0-100.
    pub emotional_eating_frequency: f64,
    pub common_triggers: Vec<TriggerCount>,
    pub peak_times: Vec<PeakTime>,
    pub mood_food_connections: Vec<MoodFoodConnection>,
    pub progress_indicators: Vec<ProgressIndicator>,
    pub recommendations: Vec<Recommendation>,
}

impl DerivedInsights {
    pub fn empty() -> Self {
        Self {
            emotional_eating_frequency: 0.0,
            common_triggers: Vec::new(),
            peak_times: Vec::new(),
            mood_food_connections: Vec::new(),
            progress_indicators: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}
