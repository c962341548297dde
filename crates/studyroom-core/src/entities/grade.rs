use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{required, Draft, EntityKind, Record};
use crate::error::ValidationError;

pub const MAX_GRADE: f64 = 10.0;

/// A graded subject weighted by its credits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    pub credits: f64,
    pub grade: f64,
    pub created_at: DateTime<Utc>,
}

impl Record for Grade {
    const KIND: EntityKind = EntityKind::Grade;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Default)]
pub struct GradeDraft {
    pub subject: String,
    pub credits: Option<f64>,
    pub grade: Option<f64>,
}

impl GradeDraft {
    pub fn new(subject: impl Into<String>, credits: Option<f64>, grade: Option<f64>) -> Self {
        Self {
            subject: subject.into(),
            credits,
            grade,
        }
    }
}

impl Draft for GradeDraft {
    type Output = Grade;

    fn validate(&self) -> Result<(), ValidationError> {
        required("subject", &self.subject)?;
        let credits = self
            .credits
            .ok_or(ValidationError::MissingField { field: "credits" })?;
        let grade = self
            .grade
            .ok_or(ValidationError::MissingField { field: "grade" })?;
        if !(credits.is_finite() && credits > 0.0) {
            return Err(ValidationError::InvalidValue {
                field: "credits",
                message: format!("must be a positive number, got {credits}"),
            });
        }
        if !(0.0..=MAX_GRADE).contains(&grade) {
            return Err(ValidationError::InvalidValue {
                field: "grade",
                message: format!("must be between 0 and {MAX_GRADE}, got {grade}"),
            });
        }
        Ok(())
    }

    fn build(self, id: String, created_at: DateTime<Utc>) -> Grade {
        Grade {
            id,
            subject: self.subject.trim().to_string(),
            subject_id: None,
            credits: self.credits.unwrap_or_default(),
            grade: self.grade.unwrap_or_default(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_three_fields_required() {
        assert_eq!(
            GradeDraft::new("Math", None, Some(8.0)).validate(),
            Err(ValidationError::MissingField { field: "credits" })
        );
        assert_eq!(
            GradeDraft::new("Math", Some(3.0), None).validate(),
            Err(ValidationError::MissingField { field: "grade" })
        );
        assert_eq!(
            GradeDraft::new(" ", Some(3.0), Some(8.0)).validate(),
            Err(ValidationError::MissingField { field: "subject" })
        );
    }

    #[test]
    fn range_checks() {
        assert!(GradeDraft::new("Math", Some(0.0), Some(8.0)).validate().is_err());
        assert!(GradeDraft::new("Math", Some(-1.0), Some(8.0)).validate().is_err());
        assert!(GradeDraft::new("Math", Some(3.0), Some(10.5)).validate().is_err());
        assert!(GradeDraft::new("Math", Some(3.0), Some(10.0)).validate().is_ok());
        assert!(GradeDraft::new("Math", Some(3.0), Some(0.0)).validate().is_ok());
    }
}
