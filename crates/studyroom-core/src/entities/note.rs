use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{required, Draft, EntityKind, Record};
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub text: String,
    /// Subject name as entered.
    pub subject: String,
    /// Subject the name resolved to when the note was added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for Note {
    const KIND: EntityKind = EntityKind::Note;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub text: String,
    pub subject: String,
}

impl NoteDraft {
    pub fn new(text: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            subject: subject.into(),
        }
    }
}

impl Draft for NoteDraft {
    type Output = Note;

    fn validate(&self) -> Result<(), ValidationError> {
        required("text", &self.text)?;
        required("subject", &self.subject)
    }

    fn build(self, id: String, created_at: DateTime<Utc>) -> Note {
        Note {
            id,
            text: self.text.trim().to_string(),
            subject: self.subject.trim().to_string(),
            subject_id: None,
            created_at,
        }
    }
}
