use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notify::Notification;
use crate::timer::{Session, TimerState};

/// State changes reported by the timer and the reminder sweep.
/// Hosts render snapshots and turn some events into notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        session: Session,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        session: Session,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        session: Session,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A countdown reached zero. `next` is the session now loaded;
    /// `auto_continued` says whether it is already running.
    SessionCompleted {
        finished: Session,
        next: Session,
        auto_continued: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        session: Session,
        remaining_secs: u64,
        total_secs: u64,
        progress: f64,
        display: String,
        at: DateTime<Utc>,
    },
    ReminderDue {
        task_id: String,
        task_name: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// The notification this event should raise, if any.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Event::SessionCompleted { finished, .. } => Some(Notification::new(
                "Pomodoro complete",
                match finished {
                    Session::Work => "Time for a break!",
                    Session::Break => "Back to work!",
                },
            )),
            Event::ReminderDue { task_name, .. } => Some(Notification::new(
                "Task reminder",
                format!("You have a pending task: {task_name}"),
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_message_depends_on_finished_session() {
        let work_done = Event::SessionCompleted {
            finished: Session::Work,
            next: Session::Break,
            auto_continued: true,
            at: Utc::now(),
        };
        assert_eq!(work_done.notification().unwrap().message, "Time for a break!");

        let break_done = Event::SessionCompleted {
            finished: Session::Break,
            next: Session::Work,
            auto_continued: true,
            at: Utc::now(),
        };
        assert_eq!(break_done.notification().unwrap().message, "Back to work!");
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Event::TimerReset { at: Utc::now() }).unwrap();
        assert_eq!(json["type"], "timer_reset");
    }
}
