use std::io;

use crossbeam_channel::{bounded, unbounded};
use tracing_subscriber::EnvFilter;

mod app;
use app::App;

mod clock;
mod config;
mod error;
mod event;
mod input;
mod mover;
mod printer;
mod ticker;
mod xoshiro256p;

use config::ClockConfig;
use event::Action;
use printer::Printer;
use xoshiro256p::Xoshiro256p;

type IOResult = Result<(), std::io::Error>;

fn main() -> error::Result<()> {
    // stdout belongs to the clock, logs only show up with RUST_LOG set
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .init();

    let config = ClockConfig::default();

    let (redraw_tx, redraw_rx) = bounded(config.redraw_capacity);
    let (action_tx, action_rx) = bounded(config.input_capacity);
    let (delay_tx, delay_rx) = unbounded();

    // raw mode swallows SIGINT from the keyboard, this covers kill and hangup
    let signal_tx = action_tx.clone();
    ctrlc::set_handler(move || {
        let _ = signal_tx.send(Action::Quit);
    })?;

    let printer = Printer::new()?;
    let mut app = App::new(config, printer, Xoshiro256p::from_clock(), delay_tx, termion::terminal_size)?;

    // producers are never joined, they die with the process
    ticker::spawn(redraw_tx.clone(), config.tick_interval)?;
    mover::spawn(redraw_tx, delay_rx, config.initial_delay)?;
    input::spawn(io::stdin(), action_tx)?;

    app.run(&redraw_rx, &action_rx)
}
