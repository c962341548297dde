use serde::Serialize;

use super::EntityStore;
use crate::entities::Task;

/// Figures shown on the overview screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub pending_tasks: usize,
    pub total_subjects: usize,
    pub active_goals: usize,
    pub gpa: f64,
    pub recent_tasks: Vec<Task>,
}

impl EntityStore {
    pub fn dashboard(&self, recent: usize) -> DashboardSummary {
        DashboardSummary {
            pending_tasks: self.data.tasks.iter().filter(|t| !t.completed).count(),
            total_subjects: self.data.subjects.len(),
            active_goals: self.data.goals.iter().filter(|g| !g.completed).count(),
            gpa: self.gpa(),
            recent_tasks: self.recent_tasks(recent).into_iter().cloned().collect(),
        }
    }
}
