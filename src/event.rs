//! Messages flowing from the producer threads to the main loop.

use chrono::{DateTime, Local};
use termion::event::Key;

/// Something changed and the clock must be drawn again.
#[derive(Debug, Clone, Copy)]
pub enum Redraw {
    /// Fresh wall-clock time from the ticker
    Tick(DateTime<Local>),
    /// The mover's delay elapsed, take one motion step
    Step,
}

/// What a keypress (or a termination signal) asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SpeedUp,
    SlowDown,
    Quit,
}

impl Action {
    /// Keys without a binding map to `None`
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Up => Some(Action::SpeedUp),
            Key::Down => Some(Action::SlowDown),
            Key::Char('q') | Key::Ctrl('c') | Key::Esc => Some(Action::Quit),
            _ => None,
        }
    }
}
