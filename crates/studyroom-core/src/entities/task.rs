use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{required, Completable, Draft, EntityKind, Record};
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    /// Free text, comma-separated.
    #[serde(default)]
    pub sub_tasks: String,
    /// Estimated hours, kept as entered.
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub reminder: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    /// Set once the reminder has fired so it never fires twice.
    #[serde(default)]
    pub notified: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reminder has passed and has not been delivered yet.
    pub fn reminder_due(&self, now: DateTime<Utc>) -> bool {
        match self.reminder {
            Some(at) => !self.notified && !self.completed && at <= now,
            None => false,
        }
    }

    pub fn sub_task_list(&self) -> Vec<&str> {
        self.sub_tasks
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl Record for Task {
    const KIND: EntityKind = EntityKind::Task;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Completable for Task {
    fn is_completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub name: String,
    pub sub_tasks: String,
    pub hours: String,
    pub reminder: Option<DateTime<Utc>>,
}

impl TaskDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Draft for TaskDraft {
    type Output = Task;

    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)
    }

    fn build(self, id: String, created_at: DateTime<Utc>) -> Task {
        Task {
            id,
            name: self.name.trim().to_string(),
            sub_tasks: self.sub_tasks.trim().to_string(),
            hours: self.hours.trim().to_string(),
            reminder: self.reminder,
            completed: false,
            notified: false,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn task_with_reminder(at: Option<DateTime<Utc>>) -> Task {
        let mut draft = TaskDraft::new("Read chapter 3");
        draft.reminder = at;
        draft.build("t1".into(), Utc::now())
    }

    #[test]
    fn loads_fields_written_by_the_web_app() {
        let json = r#"{"id":"1700000000000","name":"Essay","subTasks":"outline, draft",
            "hours":"3","reminder":null,"completed":false,"notified":false,
            "createdAt":"2024-03-01T10:00:00.000Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.sub_task_list(), vec!["outline", "draft"]);
        assert_eq!(task.hours, "3");
    }

    #[test]
    fn reminder_due_respects_notified_and_completed() {
        let now = Utc::now();
        let mut task = task_with_reminder(Some(now - Duration::minutes(1)));
        assert!(task.reminder_due(now));
        task.notified = true;
        assert!(!task.reminder_due(now));
        task.notified = false;
        task.completed = true;
        assert!(!task.reminder_due(now));
    }

    #[test]
    fn future_or_missing_reminder_is_not_due() {
        let now = Utc::now();
        assert!(!task_with_reminder(Some(now + Duration::hours(1))).reminder_due(now));
        assert!(!task_with_reminder(None).reminder_due(now));
    }

    #[test]
    fn blank_name_fails_validation() {
        assert_eq!(
            TaskDraft::new("   ").validate(),
            Err(ValidationError::MissingField { field: "name" })
        );
    }
}
