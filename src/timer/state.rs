use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tools::CopingTool;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Idle
    }
}

/// Pure countdown state for one guided session.
///
/// All transitions live here so they can be tested synchronously; the
/// controller owns the actual one-second tick. Redundant control calls
/// (pause while paused, resume while idle) are no-ops.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub status: TimerStatus,
    pub tool_id: Option<String>,
    pub tool_name: Option<String>,
    pub duration_secs: u64,
    pub time_remaining_secs: u64,
    pub step_count: u32,
    pub current_step: u32,
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            status: TimerStatus::Idle,
            tool_id: None,
            tool_name: None,
            duration_secs: 0,
            time_remaining_secs: 0,
            step_count: 0,
            current_step: 0,
            started_at: None,
        }
    }
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh countdown for a tool. Any prior elapsed time is
    /// discarded; each start counts down from the tool's nominal duration.
    pub fn begin_session(&mut self, tool: &CopingTool, started_at: DateTime<Utc>) {
        *self = Self {
            status: TimerStatus::Running,
            tool_id: Some(tool.id.to_string()),
            tool_name: Some(tool.name.to_string()),
            duration_secs: tool.duration_secs,
            time_remaining_secs: tool.duration_secs,
            step_count: tool.steps.len() as u32,
            current_step: 0,
            started_at: Some(started_at),
        };
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.duration_secs.saturating_sub(self.time_remaining_secs)
    }

    /// Percent of the session already elapsed, 0-100.
    pub fn progress_pct(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.elapsed_secs() as f64 / self.duration_secs as f64 * 100.0
    }

    /// Advance the countdown by one second. Returns true exactly when this
    /// tick completed the session; later ticks have no effect.
    pub fn tick(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }

        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        self.current_step = self.step_for_elapsed();

        if self.time_remaining_secs == 0 {
            self.status = TimerStatus::Completed;
            return true;
        }
        false
    }

    /// Steps progress proportionally with elapsed time over the fixed total
    /// duration, clamped to the last step.
    fn step_for_elapsed(&self) -> u32 {
        if self.step_count == 0 || self.duration_secs == 0 {
            return 0;
        }
        let step = self.elapsed_secs() * u64::from(self.step_count) / self.duration_secs;
        (step as u32).min(self.step_count - 1)
    }

    pub fn pause(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.status = TimerStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != TimerStatus::Paused {
            return false;
        }
        self.status = TimerStatus::Running;
        true
    }

    /// Clear the session and return to Idle.
    pub fn stop(&mut self) {
        *self = Self::default();
    }
}
