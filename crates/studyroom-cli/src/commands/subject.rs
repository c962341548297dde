use clap::Subcommand;
use studyroom_core::{Config, EntityKind, SubjectDraft};

use super::{clear_collection, delete_record, open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Register a subject
    Add {
        /// Subject name (unique)
        name: String,
        /// Teacher's name
        #[arg(long)]
        teacher: String,
    },
    /// List subjects
    List,
    /// Notes and grades whose subject is no longer registered
    Orphans,
    /// Delete a subject. Notes and grades keep their subject text.
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Delete every subject
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: SubjectAction) -> CliResult {
    match action {
        SubjectAction::Add { name, teacher } => {
            let config = Config::load_or_default();
            let mut store = open_store(&config)?;
            let subject = store.add_subject(SubjectDraft::new(name, teacher))?;
            eprintln!("Subject added: {}", subject.id);
            print_json(&subject)?;
        }
        SubjectAction::List => {
            let config = Config::load_or_default();
            let store = open_store(&config)?;
            print_json(store.subjects())?;
        }
        SubjectAction::Orphans => {
            let config = Config::load_or_default();
            let store = open_store(&config)?;
            print_json(&store.dangling_references())?;
        }
        SubjectAction::Delete { id, yes } => delete_record(EntityKind::Subject, &id, yes)?,
        SubjectAction::Clear { yes } => clear_collection(EntityKind::Subject, yes)?,
    }
    Ok(())
}
