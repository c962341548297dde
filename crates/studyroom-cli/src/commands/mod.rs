//! Subcommand handlers. Each module owns one `clap` action enum and a
//! `run` function; the helpers here are shared between them.

pub mod config;
pub mod dashboard;
pub mod data;
pub mod goal;
pub mod grade;
pub mod note;
pub mod remind;
pub mod subject;
pub mod task;
pub mod timer;

use std::io::{BufRead, Write};
use std::time::Duration;

use serde::Serialize;
use studyroom_core::{
    Config, Confirm, CoreError, Database, EntityKind, EntityStore, Notification, Notifier,
};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk store with the user's GPA precision applied.
pub fn open_store(config: &Config) -> Result<EntityStore, CoreError> {
    let mut store = EntityStore::open(Database::open()?)?;
    store.set_gpa_decimals(config.grades.decimals);
    for issue in store.load_issues() {
        eprintln!(
            "warning: stored {} data could not be read and was ignored ({})",
            issue.kind, issue.message
        );
    }
    Ok(store)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints notifications to stdout.
pub struct TerminalNotifier {
    pub enabled: bool,
    pub dismiss_after: Duration,
}

impl TerminalNotifier {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enabled: config.notifications.enabled,
            dismiss_after: Duration::from_secs(config.notifications.dismiss_after_secs),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn deliver(&mut self, notification: Notification) {
        if !self.enabled {
            tracing::debug!(title = %notification.title, "notifications disabled");
            return;
        }
        let notification = notification.with_dismiss_after(self.dismiss_after);
        tracing::debug!(
            title = %notification.title,
            dismiss_after = ?notification.dismiss_after(),
            "delivering notification"
        );
        println!("[{}] {}", notification.title, notification.message);
    }
}

/// Surface a failed command. Store errors are also delivered as a
/// notification so they read the same as reminders and timer events.
pub fn report_error(err: &(dyn std::error::Error + 'static)) {
    eprintln!("error: {err}");
    if let Some(core) = err.downcast_ref::<CoreError>() {
        let (title, message) = core.notification_text();
        let mut notifier = TerminalNotifier::from_config(&Config::load_or_default());
        notifier.deliver(Notification::new(title, message));
    }
}

/// Asks on stdin unless `--yes` was given.
pub struct PromptConfirm {
    pub assume_yes: bool,
}

impl Confirm for PromptConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [y/N] ");
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Confirm, then delete one record. Unknown ids are reported, not errors.
pub fn delete_record(kind: EntityKind, id: &str, assume_yes: bool) -> CliResult {
    let config = Config::load_or_default();
    let mut store = open_store(&config)?;
    let mut confirm = PromptConfirm { assume_yes };
    if !confirm.confirm(&format!("Delete {kind} {id}?")) {
        eprintln!("cancelled");
        return Ok(());
    }
    if store.delete(kind, id)? {
        eprintln!("{kind} deleted: {id}");
    } else {
        eprintln!("{kind} not found: {id}");
    }
    Ok(())
}

/// Confirm, then empty a whole collection.
pub fn clear_collection(kind: EntityKind, assume_yes: bool) -> CliResult {
    let config = Config::load_or_default();
    let mut store = open_store(&config)?;
    let mut confirm = PromptConfirm { assume_yes };
    if !confirm.confirm(&format!("Delete every {kind}?")) {
        eprintln!("cancelled");
        return Ok(());
    }
    store.clear_all(kind)?;
    eprintln!("all {kind} records removed");
    Ok(())
}

/// Report an outcome of `toggle_completed`.
pub fn report_toggle(kind: EntityKind, id: &str, outcome: Option<bool>) {
    match outcome {
        Some(true) => eprintln!("{kind} completed: {id}"),
        Some(false) => eprintln!("{kind} reopened: {id}"),
        None => eprintln!("{kind} not found: {id}"),
    }
}
