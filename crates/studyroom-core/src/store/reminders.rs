//! Task reminder sweep.

use chrono::{DateTime, Utc};

use super::EntityStore;
use crate::entities::Task;
use crate::error::Result;
use crate::events::Event;
use crate::notify::Notifier;

impl EntityStore {
    /// Notify every task whose reminder is due and mark it `notified`.
    ///
    /// A task notifies at most once: later sweeps skip it. The tasks
    /// collection is persisted only when something fired. Returns the ids
    /// that fired.
    pub fn scan_reminders(
        &mut self,
        now: DateTime<Utc>,
        notifier: &mut dyn Notifier,
    ) -> Result<Vec<String>> {
        let mut fired = Vec::new();
        for task in self.data.tasks.iter_mut().filter(|t| t.reminder_due(now)) {
            task.notified = true;
            fired.push(Event::ReminderDue {
                task_id: task.id.clone(),
                task_name: task.name.clone(),
                at: now,
            });
        }
        if fired.is_empty() {
            return Ok(Vec::new());
        }

        let persisted = self.persist::<Task>();
        let mut ids = Vec::with_capacity(fired.len());
        for event in fired {
            if let Some(notification) = event.notification() {
                notifier.deliver(notification);
            }
            if let Event::ReminderDue { task_id, .. } = event {
                tracing::info!(task_id = %task_id, "reminder delivered");
                ids.push(task_id);
            }
        }
        persisted?;
        Ok(ids)
    }
}
