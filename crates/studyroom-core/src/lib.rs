//! # Studyroom Core Library
//!
//! Business logic for the Studyroom student organizer: tasks, notes,
//! subjects, goals, grades with a credit-weighted GPA, and a Pomodoro timer.
//! Every operation is available through the standalone CLI; any other front
//! end is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Entity Store**: five collections, each persisted as one JSON value in a
//!   key-value backend and rewritten on every mutation
//! - **Timer**: a tick-driven Pomodoro state machine plus a tokio driver
//! - **Storage**: SQLite or in-memory key-value backends and TOML configuration
//! - **Notify**: the notification and confirmation capabilities the core
//!   calls into at the UI boundary
//!
//! ## Key Components
//!
//! - [`EntityStore`]: collections, GPA, reminder sweep, export/import
//! - [`PomodoroTimer`]: timer state machine
//! - [`TimerDriver`]: runs a timer on a cancellable one-second ticker
//! - [`Config`]: application configuration management

pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod notify;
pub mod storage;
pub mod store;
pub mod ticker;
pub mod timer;

pub use entities::{
    EntityKind, Goal, GoalCategory, GoalDraft, Grade, GradeDraft, Note, NoteDraft, Subject,
    SubjectDraft, Task, TaskDraft,
};
pub use error::{ConfigError, CoreError, ParseError, StorageError, ValidationError};
pub use events::Event;
pub use notify::{AssumeYes, Confirm, Notification, Notifier, RecordingNotifier};
pub use storage::{Config, Database, KvBackend, MemoryKv};
pub use store::{DashboardSummary, DataBundle, EntityStore};
pub use ticker::Ticker;
pub use timer::{PomodoroTimer, Session, TimerConfig, TimerDriver, TimerState};
