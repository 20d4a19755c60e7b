//! On-demand progress recomputation.
//!
//! There is no cached or incremental state: each call reads the user's full
//! log collections and reruns the pure pipeline. Callers decide when to
//! recompute (after an insert, on screen load) rather than the core pushing
//! change notifications.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::achievements::{self, Counters, EarnedAchievement};
use crate::db::Database;
use crate::insights::{analyze, AnalyzerConfig, DerivedInsights};
use crate::streaks::{compute_streaks, StreakState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub insights: DerivedInsights,
    pub streaks: StreakState,
    pub achievements: Vec<EarnedAchievement>,
}

/// Read the user's logs and derive everything in one pass.
pub async fn compute_progress(
    db: &Database,
    user_id: &str,
    config: &AnalyzerConfig,
    now: DateTime<Utc>,
) -> Result<ProgressSnapshot> {
    let food_logs = db.list_food_logs(user_id).await?;
    let trigger_logs = db.list_trigger_logs(user_id).await?;
    let tool_usage = db.list_tool_usage(user_id).await?;

    let insights = analyze(&food_logs, &trigger_logs, config);
    let streaks = compute_streaks(&food_logs);
    let counters = Counters::from_logs(
        &food_logs,
        &trigger_logs,
        &tool_usage,
        streaks.current_streak,
    );
    let achievements = achievements::evaluate(&counters, now);

    Ok(ProgressSnapshot {
        insights,
        streaks,
        achievements,
    })
}
