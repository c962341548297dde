//! Whole-store export and import.

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use serde_json::json;
use studyroom_core::{Config, Confirm, DataBundle};

use super::{open_store, print_json, CliResult, PromptConfirm};

#[derive(Subcommand)]
pub enum DataAction {
    /// Write every collection as one JSON document
    Export {
        /// Output file (stdout when omitted)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Replace all data with the contents of an exported file
    Import {
        file: PathBuf,
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> CliResult {
    let config = Config::load_or_default();
    match action {
        DataAction::Export { out } => {
            let store = open_store(&config)?;
            let bundle = store.export(Utc::now());
            let json = bundle.to_json_pretty()?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    eprintln!(
                        "exported {} records to {}",
                        bundle.record_count(),
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
        }
        DataAction::Import { file, yes } => {
            let raw = std::fs::read_to_string(&file)?;
            // Parse before asking so a bad file never reaches the prompt.
            let bundle = DataBundle::parse(&raw)?;
            let mut confirm = PromptConfirm { assume_yes: yes };
            if !confirm.confirm("Importing replaces ALL current data. Continue?") {
                eprintln!("cancelled");
                return Ok(());
            }
            let mut store = open_store(&config)?;
            let count = bundle.record_count();
            store.import(bundle)?;
            eprintln!("imported {count} records from {}", file.display());
            print_json(&json!({
                "tasks": store.tasks().len(),
                "notes": store.notes().len(),
                "subjects": store.subjects().len(),
                "goals": store.goals().len(),
                "grades": store.grades().len(),
            }))?;
        }
    }
    Ok(())
}
