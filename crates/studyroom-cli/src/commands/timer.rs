use std::time::Duration;

use clap::Subcommand;
use studyroom_core::storage::Database;
use studyroom_core::{Config, Event, Notifier, PomodoroTimer, TimerDriver, TimerState};

use super::{print_json, CliResult, TerminalNotifier};

const ENGINE_KEY: &str = "timer_engine";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer in the foreground until Ctrl-C
    Run {
        /// Stop after this many completed sessions
        #[arg(long)]
        cycles: Option<u32>,
    },
    /// Print current timer state as JSON
    Status,
    /// Reset to an idle work session
    Reset,
}

fn load_timer(db: &Database, config: &Config) -> PomodoroTimer {
    let mut timer = match db.kv_get(ENGINE_KEY) {
        Ok(Some(json)) => serde_json::from_str::<PomodoroTimer>(&json).unwrap_or_else(|e| {
            tracing::warn!("discarding saved timer state: {e}");
            PomodoroTimer::default()
        }),
        _ => PomodoroTimer::default(),
    };
    timer.set_config(config.timer_config());
    timer
}

fn save_timer(db: &Database, timer: &PomodoroTimer) -> CliResult {
    let json = serde_json::to_string(timer)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

fn print_event(event: &Event) -> CliResult {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

pub fn run(action: TimerAction) -> CliResult {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let mut timer = load_timer(&db, &config);

    match action {
        TimerAction::Run { cycles } => {
            timer = run_foreground(timer, cycles, &config)?;
        }
        TimerAction::Status => {
            print_json(&timer.snapshot())?;
        }
        TimerAction::Reset => {
            print_event(&timer.reset())?;
        }
    }

    save_timer(&db, &timer)
}

/// Drive the timer on a one-second tick, printing events as JSON lines and
/// the countdown on stderr. Returns the timer paused where it stopped.
fn run_foreground(
    timer: PomodoroTimer,
    cycles: Option<u32>,
    config: &Config,
) -> Result<PomodoroTimer, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let (mut driver, mut events) = TimerDriver::new(timer);
        let mut notifier = TerminalNotifier::from_config(config);
        let mut display = tokio::time::interval(Duration::from_secs(1));
        let mut completed = 0u32;

        if driver.start().is_none() {
            tracing::debug!("timer already running");
        }

        loop {
            tokio::select! {
                Some(event) = events.recv() => {
                    print_event(&event)?;
                    if let Event::SessionCompleted { auto_continued, .. } = &event {
                        if let Some(notification) = event.notification() {
                            notifier.deliver(notification);
                        }
                        completed += 1;
                        if cycles.is_some_and(|n| completed >= n) || !auto_continued {
                            break;
                        }
                    }
                }
                _ = display.tick() => {
                    let t = driver.timer();
                    if t.state() == TimerState::Running {
                        eprint!("\r{:?} {}  ", t.session(), t.display());
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    eprintln!();
                    break;
                }
            }
        }

        driver.pause();
        Ok(driver.timer())
    })
}
