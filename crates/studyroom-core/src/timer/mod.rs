mod driver;
mod engine;

pub use driver::TimerDriver;
pub use engine::{
    PomodoroTimer, Session, TimerConfig, TimerState, DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES,
};
