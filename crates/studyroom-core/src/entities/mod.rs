//! Record types held by the entity store.
//!
//! Every kind follows the same shape: a record with an `id` and a
//! `createdAt` timestamp, plus a draft type carrying the user-entered fields
//! that `add` validates before building the record.
//!
//! Field names serialize in camelCase so collections written by earlier
//! versions of the app (and their export files) load without conversion.

mod goal;
mod grade;
mod note;
mod subject;
mod task;

pub use goal::{Goal, GoalCategory, GoalDraft};
pub use grade::{Grade, GradeDraft};
pub use note::{Note, NoteDraft};
pub use subject::{Subject, SubjectDraft, SubjectLookup};
pub use task::{Task, TaskDraft};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The five independently persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Task,
    Note,
    Subject,
    Goal,
    Grade,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Task,
        EntityKind::Note,
        EntityKind::Subject,
        EntityKind::Goal,
        EntityKind::Grade,
    ];

    /// Persistence key. Subjects, goals and grades keep the key names the
    /// app has always written so existing stores keep loading.
    pub fn storage_key(self) -> &'static str {
        match self {
            EntityKind::Task => "tasks",
            EntityKind::Note => "notes",
            EntityKind::Subject => "clases",
            EntityKind::Goal => "metas",
            EntityKind::Grade => "materias",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Task => "task",
            EntityKind::Note => "note",
            EntityKind::Subject => "subject",
            EntityKind::Goal => "goal",
            EntityKind::Grade => "grade",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted record.
pub trait Record: Serialize + DeserializeOwned + Clone + std::fmt::Debug {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;
}

/// Records with a `completed` flag that can be toggled.
pub trait Completable: Record {
    fn is_completed(&self) -> bool;

    fn set_completed(&mut self, completed: bool);
}

/// User-entered fields for a new record.
pub trait Draft {
    type Output: Record;

    /// Check required fields. Must not have side effects.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Build the record. Only called after `validate` succeeded.
    fn build(self, id: String, created_at: DateTime<Utc>) -> Self::Output;
}

pub(crate) fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}
