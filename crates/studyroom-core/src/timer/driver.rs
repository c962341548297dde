//! Runs a [`PomodoroTimer`] on a one-second [`Ticker`].
//!
//! Commands lock the shared timer, apply the transition and start or cancel
//! the ticker. Each ticker carries the generation it was started under; a
//! pause or reset bumps the generation while holding the lock, so a tick
//! that was already in flight finds a stale generation and does nothing.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;

use super::engine::PomodoroTimer;
use crate::events::Event;
use crate::ticker::Ticker;

const TICK: Duration = Duration::from_secs(1);

struct Shared {
    timer: PomodoroTimer,
    generation: u64,
}

pub struct TimerDriver {
    shared: Arc<Mutex<Shared>>,
    ticker: Option<Ticker>,
    events: mpsc::UnboundedSender<Event>,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TimerDriver {
    /// Wrap `timer`. Every event the timer produces, including completions
    /// raised from the background tick, is sent on the returned receiver.
    pub fn new(timer: PomodoroTimer) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (events, rx) = mpsc::unbounded_channel();
        let driver = Self {
            shared: Arc::new(Mutex::new(Shared {
                timer,
                generation: 0,
            })),
            ticker: None,
            events,
        };
        (driver, rx)
    }

    /// Copy of the timer as it is right now.
    pub fn timer(&self) -> PomodoroTimer {
        lock(&self.shared).timer.clone()
    }

    pub fn snapshot(&self) -> Event {
        lock(&self.shared).timer.snapshot()
    }

    /// Start or resume. Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Option<Event> {
        let (event, generation) = {
            let mut shared = lock(&self.shared);
            let event = shared.timer.start()?;
            shared.generation += 1;
            (event, shared.generation)
        };
        if let Some(old) = self.ticker.take() {
            old.cancel();
        }
        self.ticker = Some(self.spawn_ticker(generation));
        self.emit(&event);
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.timer.pause()
        };
        self.stop_ticker();
        if let Some(event) = &event {
            self.emit(event);
        }
        event
    }

    pub fn reset(&mut self) -> Event {
        let event = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.timer.reset()
        };
        self.stop_ticker();
        self.emit(&event);
        event
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    fn emit(&self, event: &Event) {
        // A dropped receiver only means nobody is listening.
        let _ = self.events.send(event.clone());
    }

    fn spawn_ticker(&self, generation: u64) -> Ticker {
        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();
        Ticker::spawn(TICK, move || {
            let mut guard = lock(&shared);
            if guard.generation != generation {
                return ControlFlow::Break(());
            }
            if let Some(event) = guard.timer.tick() {
                let _ = events.send(event);
            }
            if guard.timer.is_running() {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        lock(&self.shared).generation += 1;
        self.stop_ticker();
    }
}
