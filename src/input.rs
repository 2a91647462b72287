//! Input thread: turns raw terminal keys into actions.

use std::io::{self, Read};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use termion::input::TermRead;
use tracing::warn;

use crate::event::Action;

/// Spawn the key reader over `source` (stdin in raw mode at runtime).
pub fn spawn<R>(source: R, sender: Sender<Action>) -> io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name("bounce-clock-input".to_string())
        .spawn(move || run_loop(source, &sender))
}

fn run_loop<R: Read>(source: R, sender: &Sender<Action>) {
    for key in source.keys() {
        let key = match key {
            Ok(key) => key,
            Err(err) => {
                warn!(%err, "key input failed, no longer reading keys");
                return;
            }
        };

        if let Some(action) = Action::from_key(key) {
            if sender.send(action).is_err() {
                return;
            }
        }
    }
}
