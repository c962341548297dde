//! Reminder sweep: once, or on an interval until Ctrl-C.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use studyroom_core::{Config, Ticker};
use tokio::task::JoinHandle;

use super::{open_store, print_json, report_error, CliResult, TerminalNotifier};

fn sweep(config: &Config) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    // Reopened on every sweep so tasks added by other invocations are seen
    // and never overwritten by a stale copy.
    let mut store = open_store(config)?;
    let mut notifier = TerminalNotifier::from_config(config);
    Ok(store.scan_reminders(Utc::now(), &mut notifier)?)
}

pub fn run(watch: bool) -> CliResult {
    let config = Config::load_or_default();
    // The first sweep runs immediately in both modes.
    let fired = sweep(&config)?;
    if !watch {
        return print_json(&fired);
    }

    let period = Duration::from_secs(config.reminders.scan_interval_secs.max(1));
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        eprintln!(
            "watching reminders every {}s (Ctrl-C to stop)",
            period.as_secs()
        );
        let config = Arc::new(config);
        let mut in_flight: Option<JoinHandle<()>> = None;
        let ticker = Ticker::spawn(period, move || {
            // SQLite work runs on the blocking pool; a slow sweep is not
            // overlapped by the next one.
            if in_flight.as_ref().is_some_and(|h| !h.is_finished()) {
                tracing::debug!("previous reminder sweep still running");
                return ControlFlow::Continue(());
            }
            let config = Arc::clone(&config);
            in_flight = Some(tokio::task::spawn_blocking(move || match sweep(&config) {
                Ok(fired) if !fired.is_empty() => {
                    tracing::info!(count = fired.len(), "reminders delivered");
                }
                Ok(_) => {}
                Err(e) => report_error(e.as_ref()),
            }));
            ControlFlow::Continue(())
        });
        let stopped = tokio::signal::ctrl_c().await;
        ticker.cancel();
        stopped
    })?;
    Ok(())
}
