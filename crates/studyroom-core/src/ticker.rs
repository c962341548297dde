//! Cancellable periodic callbacks on the tokio runtime.
//!
//! Used for the one-second Pomodoro tick and the reminder sweep. The first
//! call happens one full period after spawning. Once [`Ticker::cancel`]
//! returns, no further call begins.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

pub struct Ticker {
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Call `on_tick` every `period` until it returns `Break` or the ticker
    /// is cancelled. Must be called from within a tokio runtime.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                if on_tick().is_break() {
                    break;
                }
            }
        });
        Self { cancelled, handle }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
