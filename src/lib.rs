//! Behavioral analytics engine for emotional-eating tracking.
//!
//! The crate turns raw event logs (food entries, mood/trigger entries,
//! coping-tool usage) into derived signals: emotional-eating frequency,
//! trigger ranking, time-of-day peaks, mood-food associations, streaks, and
//! achievement state. It also drives the guided coping-session countdown.
//!
//! Everything analytical is a pure function over in-memory collections; the
//! embedded SQLite store supplies those collections per user, and the timer
//! is the only asynchronous piece.

pub mod achievements;
pub mod db;
pub mod insights;
pub mod models;
pub mod progress;
pub mod streaks;
pub mod timer;
pub mod tools;
pub mod utils;

pub use achievements::{evaluate, Counters, EarnedAchievement};
pub use db::Database;
pub use insights::{analyze, AnalyzerConfig, DerivedInsights};
pub use models::{FoodLogEntry, MealType, ToolUsageEntry, TriggerLogEntry};
pub use progress::{compute_progress, ProgressSnapshot};
pub use streaks::{compute_streaks, StreakState};
pub use timer::{TimerController, TimerEvent, TimerSnapshot, TimerState, TimerStatus};
pub use tools::{crisis_tools, find_tool, CopingTool, CrisisLevel};
