//! Streak calculation over food logs.
//!
//! A "clean" entry is one without emotional eating (no emotion, or
//! "neutral"). The current streak is the run of clean entries starting at
//! the most recent one; the longest streak is the best clean run anywhere in
//! the history.

use serde::{Deserialize, Serialize};

use crate::models::FoodLogEntry;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Total entries tracked. Deliberately a raw entry count rather than
    /// distinct calendar days, for continuity with historical reports.
    pub total_days: u32,
}

/// Compute streaks from a food log collection. Pure and idempotent; input
/// order does not matter because entries are re-sorted internally.
pub fn compute_streaks(food_logs: &[FoodLogEntry]) -> StreakState {
    let mut sorted: Vec<&FoodLogEntry> = food_logs.iter().collect();
    // Stable sort, newest first. Ordering must be deterministic because the
    // current streak is anchored at index 0.
    sorted.sort_by(|a, b| b.eating_time.cmp(&a.eating_time));

    let mut current_streak = 0u32;
    let mut longest_streak = 0u32;
    let mut run = 0u32;

    for (index, log) in sorted.iter().enumerate() {
        if log.is_emotional() {
            run = 0;
            continue;
        }

        run += 1;
        // An unbroken run from the newest entry is the current streak.
        if run == index as u32 + 1 {
            current_streak = run;
        }
        longest_streak = longest_streak.max(run);
    }

    StreakState {
        current_streak,
        longest_streak,
        total_days: sorted.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn entry(day: u32, emotion: Option<&str>) -> FoodLogEntry {
        let eating_time: DateTime<Utc> = Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap();
        FoodLogEntry {
            id: format!("food-{day}"),
            eating_time,
            food_item: "meal".to_string(),
            food_items: Vec::new(),
            quantity: None,
            meal_type: None,
            emotion: emotion.map(str::to_string),
            hunger_level: None,
            satisfaction_level: None,
            location: None,
            company: None,
            notes: None,
            mindful_eating: false,
            created_at: eating_time,
            updated_at: eating_time,
        }
    }

    #[test]
    fn empty_logs_yield_zero_state() {
        assert_eq!(compute_streaks(&[]), StreakState::default());
    }

    #[test]
    fn all_clean_entries_count_fully() {
        let logs: Vec<FoodLogEntry> = (1..=5)
            .map(|day| entry(day, if day % 2 == 0 { Some("neutral") } else { None }))
            .collect();

        let state = compute_streaks(&logs);
        assert_eq!(state.current_streak, 5);
        assert_eq!(state.longest_streak, 5);
        assert_eq!(state.total_days, 5);
    }

    #[test]
    fn emotional_entry_at_newest_position_resets_current() {
        let mut logs: Vec<FoodLogEntry> = (1..=6).map(|day| entry(day, None)).collect();
        logs.push(entry(7, Some("stressed")));

        let state = compute_streaks(&logs);
        assert_eq!(state.current_streak, 0);
        assert_eq!(state.longest_streak, 6);
        assert_eq!(state.total_days, 7);
    }

    #[test]
    fn longest_streak_survives_later_breaks() {
        // days 1-4 clean, day 5 emotional, days 6-7 clean
        let logs = vec![
            entry(1, None),
            entry(2, None),
            entry(3, Some("neutral")),
            entry(4, None),
            entry(5, Some("anxious")),
            entry(6, None),
            entry(7, None),
        ];

        let state = compute_streaks(&logs);
        assert_eq!(state.current_streak, 2);
        assert_eq!(state.longest_streak, 4);
    }

    #[test]
    fn input_order_does_not_matter() {
        let mut logs = vec![
            entry(3, None),
            entry(1, Some("sad")),
            entry(2, None),
        ];
        let forward = compute_streaks(&logs);
        logs.reverse();
        let backward = compute_streaks(&logs);
        assert_eq!(forward, backward);
        assert_eq!(forward.current_streak, 2);
    }
}
