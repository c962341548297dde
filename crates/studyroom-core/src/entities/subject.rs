use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{required, Draft, EntityKind, Record};
use crate::error::ValidationError;

/// A class in the student's registry. `name` is unique (case-sensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub teacher: String,
    pub created_at: DateTime<Utc>,
}

impl Record for Subject {
    const KIND: EntityKind = EntityKind::Subject;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Resolves the subject text stored on notes and grades.
pub trait SubjectLookup {
    fn subject_by_name(&self, name: &str) -> Option<&Subject>;

    fn subject_by_id(&self, id: &str) -> Option<&Subject>;
}

impl SubjectLookup for [Subject] {
    fn subject_by_name(&self, name: &str) -> Option<&Subject> {
        self.iter().find(|s| s.name == name)
    }

    fn subject_by_id(&self, id: &str) -> Option<&Subject> {
        self.iter().find(|s| s.id == id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubjectDraft {
    pub name: String,
    pub teacher: String,
}

impl SubjectDraft {
    pub fn new(name: impl Into<String>, teacher: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            teacher: teacher.into(),
        }
    }
}

impl Draft for SubjectDraft {
    type Output = Subject;

    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("teacher", &self.teacher)
    }

    fn build(self, id: String, created_at: DateTime<Utc>) -> Subject {
        Subject {
            id,
            name: self.name.trim().to_string(),
            teacher: self.teacher.trim().to_string(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name_is_case_sensitive() {
        let subjects = vec![SubjectDraft::new("Math", "Ada").build("s1".into(), Utc::now())];
        assert!(subjects.subject_by_name("Math").is_some());
        assert!(subjects.subject_by_name("math").is_none());
        assert_eq!(subjects.subject_by_id("s1").map(|s| s.teacher.as_str()), Some("Ada"));
    }
}
