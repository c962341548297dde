//! Pomodoro state machine.
//!
//! The timer has no thread of its own. The host calls `tick()` once per
//! elapsed second while it is running (see [`TimerDriver`](super::TimerDriver)
//! for a tokio-based host).
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//!   ^                |  \
//!   |              reset  tick to zero: flip Work <-> Break, then
//!   +-----reset------+    Running again (auto_continue) or Idle
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    Work,
    Break,
}

impl Session {
    pub fn next(self) -> Self {
        match self {
            Session::Work => Session::Break,
            Session::Break => Session::Work,
        }
    }
}

/// Session lengths and what happens when one ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub work_secs: u64,
    pub break_secs: u64,
    /// Start the next session immediately on completion. When false the
    /// timer goes to `Idle` with the next session loaded.
    pub auto_continue: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_WORK_MINUTES, DEFAULT_BREAK_MINUTES, true)
    }
}

impl TimerConfig {
    /// Zero minutes falls back to the default for that session.
    pub fn from_minutes(work_minutes: u32, break_minutes: u32, auto_continue: bool) -> Self {
        let work = if work_minutes == 0 { DEFAULT_WORK_MINUTES } else { work_minutes };
        let brk = if break_minutes == 0 { DEFAULT_BREAK_MINUTES } else { break_minutes };
        Self {
            work_secs: u64::from(work) * 60,
            break_secs: u64::from(brk) * 60,
            auto_continue,
        }
    }

    /// Durations as typed by a user. Anything that is not a positive whole
    /// number of minutes falls back to the default.
    pub fn from_text(work_minutes: &str, break_minutes: &str, auto_continue: bool) -> Self {
        let parse = |s: &str| s.trim().parse::<u32>().unwrap_or(0);
        Self::from_minutes(parse(work_minutes), parse(break_minutes), auto_continue)
    }

    pub fn duration_secs(&self, session: Session) -> u64 {
        match session {
            Session::Work => self.work_secs,
            Session::Break => self.break_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PomodoroTimer {
    config: TimerConfig,
    state: TimerState,
    session: Session,
    remaining_secs: u64,
    /// Work sessions finished since the last reset.
    #[serde(default)]
    completed_work_sessions: u32,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

impl PomodoroTimer {
    /// Starts `Idle` in a work session with the full duration loaded.
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            state: TimerState::Idle,
            session: Session::Work,
            remaining_secs: config.work_secs,
            completed_work_sessions: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work_sessions
    }

    pub fn total_secs(&self) -> u64 {
        self.config.duration_secs(self.session)
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.remaining_secs);
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            session: self.session,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            progress: self.progress(),
            display: self.display(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume counting down. No-op while already running.
    pub fn start(&mut self) -> Option<Event> {
        let resumed = match self.state {
            TimerState::Running => return None,
            TimerState::Paused => true,
            TimerState::Idle => false,
        };
        if self.remaining_secs == 0 {
            self.remaining_secs = self.total_secs();
        }
        self.state = TimerState::Running;
        let (session, remaining_secs, at) = (self.session, self.remaining_secs, Utc::now());
        Some(if resumed {
            Event::TimerResumed { session, remaining_secs, at }
        } else {
            Event::TimerStarted { session, remaining_secs, at }
        })
    }

    /// Stop counting, keeping the remaining time. No-op unless running.
    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(Event::TimerPaused {
            session: self.session,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Back to an idle work session with the full duration.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.session = Session::Work;
        self.remaining_secs = self.config.work_secs;
        self.completed_work_sessions = 0;
        Event::TimerReset { at: Utc::now() }
    }

    /// One elapsed second. Returns `SessionCompleted` when the countdown
    /// reaches zero; ignored unless running.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        let finished = self.session;
        if finished == Session::Work {
            self.completed_work_sessions += 1;
        }
        self.session = finished.next();
        self.remaining_secs = self.total_secs();
        self.state = if self.config.auto_continue {
            TimerState::Running
        } else {
            TimerState::Idle
        };
        Some(Event::SessionCompleted {
            finished,
            next: self.session,
            auto_continued: self.config.auto_continue,
            at: Utc::now(),
        })
    }

    /// Replace the configuration. An idle timer reloads the full duration
    /// of its current session; a running or paused one keeps its remaining
    /// time until the session ends.
    pub fn set_config(&mut self, config: TimerConfig) {
        self.config = config;
        if self.state == TimerState::Idle {
            self.remaining_secs = self.total_secs();
        }
    }
}
