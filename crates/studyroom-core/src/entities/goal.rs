use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{required, Completable, Draft, EntityKind, Record};
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    #[default]
    #[serde(alias = "academica")]
    Academic,
    Personal,
}

impl std::str::FromStr for GoalCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "academic" | "academica" => Ok(GoalCategory::Academic),
            "personal" => Ok(GoalCategory::Personal),
            other => Err(ValidationError::InvalidValue {
                field: "category",
                message: format!("expected 'academic' or 'personal', got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub category: GoalCategory,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Record for Goal {
    const KIND: EntityKind = EntityKind::Goal;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Completable for Goal {
    fn is_completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub deadline: Option<NaiveDate>,
    pub category: GoalCategory,
}

impl GoalDraft {
    pub fn new(title: impl Into<String>, deadline: Option<NaiveDate>) -> Self {
        Self {
            title: title.into(),
            deadline,
            ..Self::default()
        }
    }
}

impl Draft for GoalDraft {
    type Output = Goal;

    fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title)?;
        if self.deadline.is_none() {
            return Err(ValidationError::MissingField { field: "deadline" });
        }
        Ok(())
    }

    fn build(self, id: String, created_at: DateTime<Utc>) -> Goal {
        Goal {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            // validate() guarantees a deadline
            deadline: self.deadline.unwrap_or_else(|| created_at.date_naive()),
            category: self.category,
            completed: false,
            created_at,
        }
    }
}
