//! Ticker thread: refreshes the displayed time once per interval.

use core::time::Duration;
use std::io;
use std::thread::{self, JoinHandle};

use chrono::Local;
use crossbeam_channel::Sender;

use crate::event::Redraw;

/// Spawn the ticker. It stops on its own once the receiver is dropped.
pub fn spawn(sender: Sender<Redraw>, interval: Duration) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("bounce-clock-ticker".to_string())
        .spawn(move || run_loop(&sender, interval))
}

fn run_loop(sender: &Sender<Redraw>, interval: Duration) {
    loop {
        if sender.send(Redraw::Tick(Local::now())).is_err() {
            break;
        }

        thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn sends_ticks() {
        let (tx, rx) = bounded(2);
        let handle = spawn(tx, Duration::from_millis(10)).unwrap();

        for _ in 0..2 {
            let tick = rx.recv_timeout(Duration::from_millis(500));
            assert!(matches!(tick, Ok(Redraw::Tick(_))));
        }

        drop(rx);
        handle.join().unwrap();
    }

    #[test]
    fn ticks_carry_current_time() {
        let (tx, rx) = bounded(1);
        let before = Local::now();
        let _handle = spawn(tx, Duration::from_secs(1)).unwrap();

        match rx.recv_timeout(Duration::from_millis(500)) {
            Ok(Redraw::Tick(now)) => assert!(now >= before),
            other => panic!("unexpected {other:?}"),
        }
    }
}
