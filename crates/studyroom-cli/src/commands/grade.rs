use clap::Subcommand;
use serde_json::json;
use studyroom_core::{Config, EntityKind, GradeDraft};

use super::{clear_collection, delete_record, open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum GradeAction {
    /// Record a grade
    Add {
        /// Subject name
        subject: String,
        /// Credit weight (> 0)
        #[arg(long)]
        credits: Option<f64>,
        /// Grade on the 0-10 scale
        #[arg(long)]
        grade: Option<f64>,
    },
    /// List grades
    List,
    /// Print the credit-weighted GPA
    Gpa,
    /// Delete a grade
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Delete every grade
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: GradeAction) -> CliResult {
    match action {
        GradeAction::Add {
            subject,
            credits,
            grade,
        } => {
            let config = Config::load_or_default();
            let mut store = open_store(&config)?;
            let grade = store.add_grade(GradeDraft::new(subject, credits, grade))?;
            eprintln!("Grade added: {}", grade.id);
            print_json(&grade)?;
        }
        GradeAction::List => {
            let config = Config::load_or_default();
            let store = open_store(&config)?;
            print_json(store.grades())?;
        }
        GradeAction::Gpa => {
            let config = Config::load_or_default();
            let store = open_store(&config)?;
            let credits: f64 = store.grades().iter().map(|g| g.credits).sum();
            print_json(&json!({
                "gpa": store.gpa(),
                "grades": store.grades().len(),
                "credits": credits,
            }))?;
        }
        GradeAction::Delete { id, yes } => delete_record(EntityKind::Grade, &id, yes)?,
        GradeAction::Clear { yes } => clear_collection(EntityKind::Grade, yes)?,
    }
    Ok(())
}
