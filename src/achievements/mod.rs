//! Achievement evaluation.
//!
//! Stateless: counters go in, the earned subset of the catalog comes out.
//! There is no persisted "earned forever" ledger; an achievement is earned
//! exactly when the current counters meet its requirement.

pub mod catalog;

pub use catalog::{find_achievement, Achievement, AchievementCategory, CounterKind, CATALOG};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use crate::models::{FoodLogEntry, ToolUsageEntry, TriggerLogEntry};

const EXERCISE_KEYWORDS: &[&str] = &["walk", "exercise"];
const MEDITATION_KEYWORDS: &[&str] = &["breathing", "meditation"];
const CREATIVE_KEYWORDS: &[&str] = &["draw", "creative"];

/// Derived activity counters the catalog is evaluated against.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    pub current_streak: u32,
    pub mindful_sessions: u32,
    pub coping_tool_usage: u32,
    pub journal_entries: u32,
    pub exercise_activities: u32,
    pub meditation_sessions: u32,
    pub creative_activities: u32,
}

impl Counters {
    /// Derive all counters from raw logs. The wellness counters classify
    /// tool names by case-insensitive substring match, so e.g. both
    /// "Quick Walk" and "Morning walk" count toward exercise.
    pub fn from_logs(
        food_logs: &[FoodLogEntry],
        trigger_logs: &[TriggerLogEntry],
        tool_usage: &[ToolUsageEntry],
        current_streak: u32,
    ) -> Self {
        let mindful_sessions = food_logs.iter().filter(|log| log.mindful_eating).count();

        let count_matching = |keywords: &[&str]| {
            tool_usage
                .iter()
                .filter(|usage| name_matches(&usage.tool_name, keywords))
                .count() as u32
        };

        Self {
            current_streak,
            mindful_sessions: mindful_sessions as u32,
            coping_tool_usage: tool_usage.len() as u32,
            journal_entries: trigger_logs.len() as u32,
            exercise_activities: count_matching(EXERCISE_KEYWORDS),
            meditation_sessions: count_matching(MEDITATION_KEYWORDS),
            creative_activities: count_matching(CREATIVE_KEYWORDS),
        }
    }

    pub fn get(&self, kind: CounterKind) -> u32 {
        match kind {
            CounterKind::CurrentStreak => self.current_streak,
            CounterKind::MindfulSessions => self.mindful_sessions,
            CounterKind::CopingToolUsage => self.coping_tool_usage,
            CounterKind::JournalEntries => self.journal_entries,
            CounterKind::ExerciseActivities => self.exercise_activities,
            CounterKind::MeditationSessions => self.meditation_sessions,
            CounterKind::CreativeActivities => self.creative_activities,
        }
    }
}

fn name_matches(name: &str, keywords: &[&str]) -> bool {
    let name = name.to_lowercase();
    keywords.iter().any(|keyword| name.contains(keyword))
}

/// An earned catalog entry with the counter value that earned it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EarnedAchievement {
    #[serde(flatten)]
    pub achievement: &'static Achievement,
    /// Raw counter value, not clamped to the requirement.
    pub progress: u32,
    /// Evaluation time supplied by the caller, not a first-earned time.
    pub earned_at: DateTime<Utc>,
}

/// Evaluate the full catalog against the given counters. Output preserves
/// catalog order and contains earned achievements only.
pub fn evaluate(counters: &Counters, now: DateTime<Utc>) -> Vec<EarnedAchievement> {
    CATALOG
        .iter()
        .filter_map(|achievement| {
            let progress = counters.get(achievement.counter);
            (progress >= achievement.requirement).then_some(EarnedAchievement {
                achievement,
                progress,
                earned_at: now,
            })
        })
        .collect()
}

/// Percentage toward an achievement's requirement, capped at 100.
pub fn progress_pct(achievement: &Achievement, counters: &Counters) -> f64 {
    let progress = counters.get(achievement.counter) as f64;
    (progress / achievement.requirement as f64 * 100.0).min(100.0)
}

/// Non-food reward ideas surfaced when celebrating a new achievement.
pub const REWARD_SUGGESTIONS: &[&str] = &[
    "Treat yourself to a relaxing bath",
    "Buy yourself a small plant or flowers",
    "Take yourself to a movie",
    "Get a massage or spa treatment",
    "Buy a new book you've been wanting",
    "Plan a fun day trip",
    "Buy yourself a nice piece of jewelry",
    "Take a cooking class",
    "Get a new hobby supply",
    "Plan a special dinner with friends",
];

pub fn suggest_reward() -> &'static str {
    let index = rand::thread_rng().gen_range(0..REWARD_SUGGESTIONS.len());
    REWARD_SUGGESTIONS[index]
}
