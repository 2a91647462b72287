//! Mover thread: paces motion steps.
//!
//! The step itself is applied by the main loop, this thread only waits
//! out the current delay and asks for it. Delay changes arrive on their
//! own channel and are picked up after the running sleep, so a change
//! made mid-sleep shapes the next cycle.

use core::time::Duration;
use std::io;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::event::Redraw;

/// Spawn the mover. It stops once either channel is disconnected.
pub fn spawn(
    sender: Sender<Redraw>,
    delays: Receiver<Duration>,
    initial: Duration,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("bounce-clock-mover".to_string())
        .spawn(move || run_loop(&sender, &delays, initial))
}

fn run_loop(sender: &Sender<Redraw>, delays: &Receiver<Duration>, mut delay: Duration) {
    loop {
        thread::sleep(delay);

        // only the latest change matters
        loop {
            match delays.try_recv() {
                Ok(next) => delay = next,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return,
            }
        }

        if sender.send(Redraw::Step).is_err() {
            return;
        }
    }
}
