use chrono::NaiveDate;
use clap::Subcommand;
use studyroom_core::{Config, EntityKind, GoalCategory, GoalDraft};

use super::{clear_collection, delete_record, open_store, print_json, report_toggle, CliResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a goal
    Add {
        /// Goal title
        title: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<NaiveDate>,
        /// academic or personal
        #[arg(long, default_value = "academic")]
        category: GoalCategory,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List goals
    List {
        /// Only goals not yet completed
        #[arg(long)]
        active: bool,
    },
    /// Mark a goal completed, or active again
    Toggle { id: String },
    /// Delete a goal
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Delete every goal
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: GoalAction) -> CliResult {
    match action {
        GoalAction::Add {
            title,
            deadline,
            category,
            description,
        } => {
            let config = Config::load_or_default();
            let mut store = open_store(&config)?;
            let goal = store.add_goal(GoalDraft {
                title,
                description,
                deadline,
                category,
            })?;
            eprintln!("Goal added: {}", goal.id);
            print_json(&goal)?;
        }
        GoalAction::List { active } => {
            let config = Config::load_or_default();
            let store = open_store(&config)?;
            let goals: Vec<_> = store
                .goals()
                .iter()
                .filter(|g| !active || !g.completed)
                .collect();
            print_json(&goals)?;
        }
        GoalAction::Toggle { id } => {
            let config = Config::load_or_default();
            let mut store = open_store(&config)?;
            let outcome = store.toggle_goal(&id)?;
            report_toggle(EntityKind::Goal, &id, outcome);
        }
        GoalAction::Delete { id, yes } => delete_record(EntityKind::Goal, &id, yes)?,
        GoalAction::Clear { yes } => clear_collection(EntityKind::Goal, yes)?,
    }
    Ok(())
}
