use std::{sync::Arc, time::Duration};

use anyhow::{bail, Result};
use chrono::Utc;
use log::error;
use serde::Serialize;
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{db::Database, log_info, models::ToolUsageEntry, tools::CopingTool};

use super::{TimerState, TimerStatus};

// Set to true to enable verbose per-tick logging in this module
const ENABLE_LOGS: bool = false;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub progress_pct: f64,
}

/// Events broadcast by the controller. Callers subscribe instead of the
/// core pushing into any UI; dropped receivers are ignored.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TimerEvent {
    StateChanged {
        snapshot: TimerSnapshot,
    },
    Tick {
        snapshot: TimerSnapshot,
    },
    SessionCompleted {
        snapshot: TimerSnapshot,
        /// The recorded usage row, or None if the store write failed. A
        /// failed write never disturbs the timer state itself.
        usage: Option<ToolUsageEntry>,
    },
}

struct TickerHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

/// Drives one countdown at a time for a single user-facing session.
///
/// The pure transition logic lives in [`TimerState`]; this controller owns
/// the one-second ticker task, cancels it deterministically on pause/stop,
/// and appends the tool-usage row when a session completes.
#[derive(Clone)]
pub struct TimerController {
    state: Arc<Mutex<TimerState>>,
    db: Database,
    user_id: String,
    events: broadcast::Sender<TimerEvent>,
    ticker: Arc<Mutex<Option<TickerHandle>>>,
    tick_interval: Duration,
}

impl TimerController {
    pub fn new(db: Database, user_id: impl Into<String>) -> Self {
        Self::with_tick_interval(db, user_id, Duration::from_secs(1))
    }

    /// Construct with a custom tick interval. Anything other than one
    /// second is only meant for tests.
    pub fn with_tick_interval(
        db: Database,
        user_id: impl Into<String>,
        tick_interval: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(TimerState::new())),
            db,
            user_id: user_id.into(),
            events,
            ticker: Arc::new(Mutex::new(None)),
            tick_interval,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.events.subscribe()
    }

    pub async fn get_state(&self) -> TimerState {
        self.state.lock().await.clone()
    }

    pub async fn get_snapshot(&self) -> TimerSnapshot {
        let guard = self.state.lock().await;
        snapshot_of(&guard)
    }

    /// Begin a fresh countdown for a tool. Fails if a session is already
    /// active; a Completed session may be restarted directly.
    pub async fn start_session(&self, tool: &CopingTool) -> Result<TimerSnapshot> {
        if tool.duration_secs == 0 {
            bail!("tool duration must be greater than zero");
        }

        {
            let state = self.state.lock().await;
            if matches!(state.status, TimerStatus::Running | TimerStatus::Paused) {
                bail!("timer already active");
            }
        }

        // Reap the previous session's finished ticker, if any.
        self.cancel_ticker().await;

        {
            let mut state = self.state.lock().await;
            state.begin_session(tool, Utc::now());
        }

        self.spawn_ticker().await;

        let snapshot = self.get_snapshot().await;
        let _ = self.events.send(TimerEvent::StateChanged {
            snapshot: snapshot.clone(),
        });
        Ok(snapshot)
    }

    /// Suspend the countdown. No-op unless currently Running; no tick fires
    /// between pause() returning and a later resume().
    pub async fn pause(&self) -> Result<TimerSnapshot> {
        let changed = self.state.lock().await.pause();
        if changed {
            self.cancel_ticker().await;
            let snapshot = self.get_snapshot().await;
            let _ = self.events.send(TimerEvent::StateChanged {
                snapshot: snapshot.clone(),
            });
            return Ok(snapshot);
        }
        Ok(self.get_snapshot().await)
    }

    /// Resume a paused countdown. No-op in any other state.
    pub async fn resume(&self) -> Result<TimerSnapshot> {
        let changed = self.state.lock().await.resume();
        if changed {
            self.spawn_ticker().await;
            let snapshot = self.get_snapshot().await;
            let _ = self.events.send(TimerEvent::StateChanged {
                snapshot: snapshot.clone(),
            });
            return Ok(snapshot);
        }
        Ok(self.get_snapshot().await)
    }

    /// Abandon the session and return to Idle. Elapsed time is discarded;
    /// nothing is recorded.
    pub async fn stop(&self) -> Result<()> {
        // Cancel first so no tick can land after the state clears.
        self.cancel_ticker().await;

        {
            let mut state = self.state.lock().await;
            if state.status == TimerStatus::Idle {
                return Ok(());
            }
            state.stop();
        }

        let snapshot = self.get_snapshot().await;
        let _ = self.events.send(TimerEvent::StateChanged { snapshot });
        Ok(())
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.token.cancel();
            handle.task.abort();
        }

        let token = CancellationToken::new();
        let task = tokio::spawn(run_ticker(
            self.state.clone(),
            self.db.clone(),
            self.user_id.clone(),
            self.events.clone(),
            token.clone(),
            self.tick_interval,
        ));

        *ticker_guard = Some(TickerHandle { token, task });
    }

    async fn cancel_ticker(&self) {
        let handle = self.ticker.lock().await.take();
        if let Some(TickerHandle { token, task }) = handle {
            token.cancel();
            // Wait for the loop to wind down so no tick outlives this call.
            let _ = task.await;
        }
    }
}

fn snapshot_of(state: &TimerState) -> TimerSnapshot {
    TimerSnapshot {
        progress_pct: state.progress_pct(),
        state: state.clone(),
    }
}

async fn run_ticker(
    state: Arc<Mutex<TimerState>>,
    db: Database,
    user_id: String,
    events: broadcast::Sender<TimerEvent>,
    token: CancellationToken,
    tick_interval: Duration,
) {
    let mut interval = time::interval(tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick fires immediately; consume it so every
    // decrement lands a full period after start/resume.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = interval.tick() => {}
        }

        let (snapshot, completed, tool_name) = {
            let mut guard = state.lock().await;
            if guard.status != TimerStatus::Running {
                break;
            }
            let completed = guard.tick();
            let tool_name = guard.tool_name.clone().unwrap_or_default();
            (snapshot_of(&guard), completed, tool_name)
        };

        log_info!(
            "tick: {}s remaining for {tool_name}",
            snapshot.state.time_remaining_secs
        );

        if completed {
            // Fire-and-forget for timer-state purposes: a failed write is
            // logged and reported on the event, nothing rolls back.
            let usage = match db.append_tool_usage(&user_id, &tool_name, Utc::now()).await {
                Ok(usage) => Some(usage),
                Err(err) => {
                    error!("failed to record usage of {tool_name}: {err:#}");
                    None
                }
            };

            let _ = events.send(TimerEvent::SessionCompleted { snapshot, usage });
            break;
        }

        let _ = events.send(TimerEvent::Tick { snapshot });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::find_tool;
    use tempfile::TempDir;
    use tokio::time::timeout;

    const TEST_USER: &str = "user-1";

    fn test_db(dir: &TempDir) -> Database {
        Database::new(dir.path().join("timer-test.sqlite3")).unwrap()
    }

    fn fast_controller(db: Database) -> TimerController {
        TimerController::with_tick_interval(db, TEST_USER, Duration::from_millis(2))
    }

    async fn wait_for_completion(
        events: &mut broadcast::Receiver<TimerEvent>,
    ) -> (TimerSnapshot, Option<ToolUsageEntry>) {
        loop {
            let event = timeout(Duration::from_secs(5), events.recv())
                .await
                .expect("timed out waiting for completion")
                .expect("event channel closed");
            if let TimerEvent::SessionCompleted { snapshot, usage } = event {
                return (snapshot, usage);
            }
        }
    }

    #[tokio::test]
    async fn countdown_completes_and_records_usage() {
        let dir = TempDir::new().unwrap();
        let db = test_db(&dir);
        let controller = fast_controller(db.clone());
        let mut events = controller.subscribe();

        let tool = find_tool("ice-cube").unwrap();
        controller.start_session(tool).await.unwrap();

        let (snapshot, usage) = wait_for_completion(&mut events).await;
        assert_eq!(snapshot.state.status, TimerStatus::Completed);
        assert_eq!(snapshot.state.time_remaining_secs, 0);

        let usage = usage.expect("usage should be recorded");
        assert_eq!(usage.tool_name, tool.name);

        let stored = db.list_tool_usage(TEST_USER).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].tool_name, tool.name);
    }

    #[tokio::test]
    async fn completion_fires_exactly_once() {
        let dir = TempDir::new().unwrap();
        let db = test_db(&dir);
        let controller = fast_controller(db.clone());
        let mut events = controller.subscribe();

        let tool = find_tool("ice-cube").unwrap();
        controller.start_session(tool).await.unwrap();
        wait_for_completion(&mut events).await;

        // Give any stray tick time to fire, then confirm nothing moved.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(controller.get_state().await.status, TimerStatus::Completed);
        assert_eq!(db.list_tool_usage(TEST_USER).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn pause_halts_ticks_until_resume() {
        let dir = TempDir::new().unwrap();
        let controller = fast_controller(test_db(&dir));

        let tool = find_tool("quick-walk").unwrap();
        controller.start_session(tool).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let paused = controller.pause().await.unwrap();
        assert_eq!(paused.state.status, TimerStatus::Paused);
        let frozen = paused.state.time_remaining_secs;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(controller.get_state().await.time_remaining_secs, frozen);

        let resumed = controller.resume().await.unwrap();
        assert_eq!(resumed.state.status, TimerStatus::Running);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(controller.get_state().await.time_remaining_secs < frozen);
    }

    #[tokio::test]
    async fn stop_resets_to_idle_and_records_nothing() {
        let dir = TempDir::new().unwrap();
        let db = test_db(&dir);
        let controller = fast_controller(db.clone());

        let tool = find_tool("gratitude").unwrap();
        controller.start_session(tool).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        controller.stop().await.unwrap();
        assert_eq!(controller.get_state().await, TimerState::default());
        assert!(db.list_tool_usage(TEST_USER).await.unwrap().is_empty());

        // Redundant control calls on an idle timer stay no-ops.
        controller.stop().await.unwrap();
        let snapshot = controller.resume().await.unwrap();
        assert_eq!(snapshot.state.status, TimerStatus::Idle);
    }

    #[tokio::test]
    async fn second_start_while_active_is_rejected() {
        let dir = TempDir::new().unwrap();
        let controller = fast_controller(test_db(&dir));

        let tool = find_tool("calming-music").unwrap();
        controller.start_session(tool).await.unwrap();
        assert!(controller.start_session(tool).await.is_err());

        controller.pause().await.unwrap();
        assert!(controller.start_session(tool).await.is_err());
    }
}
