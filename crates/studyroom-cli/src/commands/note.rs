use clap::Subcommand;
use studyroom_core::{Config, EntityKind, NoteDraft};

use super::{clear_collection, delete_record, open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Add a note to a subject
    Add {
        /// Note text
        text: String,
        /// Subject name
        #[arg(long)]
        subject: String,
    },
    /// List notes
    List {
        /// Only notes for this subject
        #[arg(long)]
        subject: Option<String>,
    },
    /// Delete a note
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Delete every note
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: NoteAction) -> CliResult {
    match action {
        NoteAction::Add { text, subject } => {
            let config = Config::load_or_default();
            let mut store = open_store(&config)?;
            let note = store.add_note(NoteDraft::new(text, subject))?;
            if note.subject_id.is_none() {
                eprintln!("warning: subject '{}' is not registered", note.subject);
                let known = store.subject_names();
                if known.is_empty() {
                    eprintln!("hint: no subjects registered yet (see `studyroom subject add`)");
                } else {
                    eprintln!("hint: registered subjects: {}", known.join(", "));
                }
            }
            eprintln!("Note added: {}", note.id);
            print_json(&note)?;
        }
        NoteAction::List { subject } => {
            let config = Config::load_or_default();
            let store = open_store(&config)?;
            let notes: Vec<_> = store
                .notes()
                .iter()
                .filter(|n| subject.as_deref().map_or(true, |s| n.subject == s))
                .collect();
            print_json(&notes)?;
        }
        NoteAction::Delete { id, yes } => delete_record(EntityKind::Note, &id, yes)?,
        NoteAction::Clear { yes } => clear_collection(EntityKind::Note, yes)?,
    }
    Ok(())
}
