//! Task management commands for CLI.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use clap::Subcommand;
use studyroom_core::{Config, EntityKind, TaskDraft};

use super::{clear_collection, delete_record, open_store, print_json, report_toggle, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task name
        name: String,
        /// Comma-separated sub-tasks
        #[arg(long, default_value = "")]
        sub_tasks: String,
        /// Estimated hours
        #[arg(long, default_value = "")]
        hours: String,
        /// Reminder time: RFC 3339, or "YYYY-MM-DD HH:MM" in local time
        #[arg(long, value_parser = parse_reminder)]
        reminder: Option<DateTime<Utc>>,
    },
    /// List tasks
    List {
        /// Only tasks not yet completed
        #[arg(long)]
        pending: bool,
    },
    /// Mark a task completed, or pending again
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Delete every task
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

pub fn parse_reminder(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|at| at.with_timezone(&Utc))
                .ok_or_else(|| format!("'{raw}' does not exist in the local time zone"));
        }
    }
    Err(format!(
        "cannot parse '{raw}' as a time (use RFC 3339 or \"YYYY-MM-DD HH:MM\")"
    ))
}

pub fn run(action: TaskAction) -> CliResult {
    match action {
        TaskAction::Add {
            name,
            sub_tasks,
            hours,
            reminder,
        } => {
            let config = Config::load_or_default();
            let mut store = open_store(&config)?;
            let task = store.add_task(TaskDraft {
                name,
                sub_tasks,
                hours,
                reminder,
            })?;
            eprintln!("Task added: {}", task.id);
            print_json(&task)?;
        }
        TaskAction::List { pending } => {
            let config = Config::load_or_default();
            let store = open_store(&config)?;
            let tasks: Vec<_> = store
                .tasks()
                .iter()
                .filter(|t| !pending || !t.completed)
                .collect();
            print_json(&tasks)?;
        }
        TaskAction::Toggle { id } => {
            let config = Config::load_or_default();
            let mut store = open_store(&config)?;
            let outcome = store.toggle_task(&id)?;
            report_toggle(EntityKind::Task, &id, outcome);
        }
        TaskAction::Delete { id, yes } => delete_record(EntityKind::Task, &id, yes)?,
        TaskAction::Clear { yes } => clear_collection(EntityKind::Task, yes)?,
    }
    Ok(())
}
