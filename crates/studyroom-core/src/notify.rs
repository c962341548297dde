//! Capabilities the core calls into at the UI boundary.
//!
//! The store and timer never render anything. They hand notifications to a
//! [`Notifier`] and leave confirmation prompts to a [`Confirm`]
//! implementation supplied by the host.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Notifications close on their own after this long unless dismissed.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub dismiss_after_secs: u64,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            dismiss_after_secs: DEFAULT_DISMISS_AFTER.as_secs(),
        }
    }

    pub fn dismiss_after(&self) -> Duration {
        Duration::from_secs(self.dismiss_after_secs)
    }

    pub fn with_dismiss_after(mut self, after: Duration) -> Self {
        self.dismiss_after_secs = after.as_secs();
        self
    }
}

/// Delivers a notification to whoever is displaying the app.
pub trait Notifier {
    fn deliver(&mut self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn deliver(&mut self, notification: Notification) {
        (**self).deliver(notification)
    }
}

/// Keeps every delivered notification. Useful in tests and for hosts that
/// drain notifications on their own schedule.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub delivered: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.delivered.iter().map(|n| n.title.as_str()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn deliver(&mut self, notification: Notification) {
        self.delivered.push(notification);
    }
}

/// Asks the user to confirm a destructive action (delete, clear, import).
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Confirms everything. Used for `--yes` and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}
