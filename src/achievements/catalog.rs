//! Fixed achievement catalog.
//!
//! Evaluation never mutates this table; earned status is recomputed from the
//! current counters on every call.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AchievementCategory {
    Streak,
    Skill,
    Wellness,
}

/// Which derived counter an achievement is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    CurrentStreak,
    MindfulSessions,
    CopingToolUsage,
    JournalEntries,
    ExerciseActivities,
    MeditationSessions,
    CreativeActivities,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub requirement: u32,
    pub reward: &'static str,
    #[serde(skip)]
    pub counter: CounterKind,
}

pub const CATALOG: &[Achievement] = &[
    // Streak achievements
    Achievement {
        id: "streak_3",
        name: "Getting Started",
        description: "3 days without emotional eating",
        category: AchievementCategory::Streak,
        requirement: 3,
        reward: "Bronze Badge",
        counter: CounterKind::CurrentStreak,
    },
    Achievement {
        id: "streak_7",
        name: "Week Warrior",
        description: "7 days without emotional eating",
        category: AchievementCategory::Streak,
        requirement: 7,
        reward: "Silver Badge",
        counter: CounterKind::CurrentStreak,
    },
    Achievement {
        id: "streak_14",
        name: "Fortnight Fighter",
        description: "14 days without emotional eating",
        category: AchievementCategory::Streak,
        requirement: 14,
        reward: "Gold Badge",
        counter: CounterKind::CurrentStreak,
    },
    Achievement {
        id: "streak_30",
        name: "Monthly Master",
        description: "30 days without emotional eating",
        category: AchievementCategory::Streak,
        requirement: 30,
        reward: "Diamond Badge",
        counter: CounterKind::CurrentStreak,
    },
    Achievement {
        id: "streak_100",
        name: "Century Champion",
        description: "100 days without emotional eating",
        category: AchievementCategory::Streak,
        requirement: 100,
        reward: "Legendary Badge",
        counter: CounterKind::CurrentStreak,
    },
    // Skill achievements
    Achievement {
        id: "mindful_10",
        name: "Mindful Beginner",
        description: "Complete 10 mindful eating sessions",
        category: AchievementCategory::Skill,
        requirement: 10,
        reward: "Mindfulness Certificate",
        counter: CounterKind::MindfulSessions,
    },
    Achievement {
        id: "coping_20",
        name: "Coping Expert",
        description: "Use coping strategies 20 times",
        category: AchievementCategory::Skill,
        requirement: 20,
        reward: "Coping Master Badge",
        counter: CounterKind::CopingToolUsage,
    },
    Achievement {
        id: "journal_30",
        name: "Reflection Master",
        description: "Log mood and triggers for 30 days",
        category: AchievementCategory::Skill,
        requirement: 30,
        reward: "Self-Awareness Award",
        counter: CounterKind::JournalEntries,
    },
    // Wellness achievements
    Achievement {
        id: "exercise_15",
        name: "Active Lifestyle",
        description: "Complete 15 physical activities",
        category: AchievementCategory::Wellness,
        requirement: 15,
        reward: "Fitness Enthusiast Badge",
        counter: CounterKind::ExerciseActivities,
    },
    Achievement {
        id: "meditation_25",
        name: "Zen Master",
        description: "Complete 25 meditation sessions",
        category: AchievementCategory::Wellness,
        requirement: 25,
        reward: "Inner Peace Award",
        counter: CounterKind::MeditationSessions,
    },
    Achievement {
        id: "creative_10",
        name: "Creative Soul",
        description: "Complete 10 creative activities",
        category: AchievementCategory::Wellness,
        requirement: 10,
        reward: "Artistic Expression Badge",
        counter: CounterKind::CreativeActivities,
    },
];

pub fn find_achievement(id: &str) -> Option<&'static Achievement> {
    CATALOG.iter().find(|achievement| achievement.id == id)
}
