//! Main loop: the only place clock state is mutated.
//!
//! Producers never touch the state. They send redraw signals and actions
//! over channels, and this loop applies each one in arrival order and
//! renders after every redraw signal.

use core::time::Duration;
use std::io::{self, Write};

use chrono::Local;
use crossbeam_channel::{Receiver, Sender, select};
use tracing::{debug, info, trace};

use crate::{
    clock::ClockState,
    config::ClockConfig,
    error::Result,
    event::{Action, Redraw},
    printer::Printer,
    xoshiro256p::RandomSource,
};

/// Terminal size query, (cols, rows)
pub type SizeFn = fn() -> io::Result<(u16, u16)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App<W: Write, R: RandomSource> {
    clock: ClockState,
    printer: Printer<W>,
    rng: R,

    /// Delay changes for the mover thread
    delays: Sender<Duration>,

    size: SizeFn,
}

impl<W: Write, R: RandomSource> App<W, R> {
    pub fn new(
        config: ClockConfig,
        printer: Printer<W>,
        mut rng: R,
        delays: Sender<Duration>,
        size: SizeFn,
    ) -> Result<Self> {
        let screen = size()?;
        let clock = ClockState::new(config, Local::now(), screen, &mut rng);

        let (x, y) = clock.position();
        info!(cols = screen.0, rows = screen.1, x, y, "clock starting");

        Ok(App {
            clock,
            printer,
            rng,
            delays,
            size,
        })
    }

    /// Block on both channels until a quit action arrives or every
    /// producer on one side is gone.
    pub fn run(&mut self, redraws: &Receiver<Redraw>, actions: &Receiver<Action>) -> Result<()> {
        loop {
            select! {
                recv(actions) -> action => {
                    let Ok(action) = action else {
                        debug!("input channel closed");
                        return Ok(());
                    };

                    if self.apply(action) == Flow::Quit {
                        info!("quit requested");
                        return Ok(());
                    }
                }
                recv(redraws) -> redraw => {
                    let Ok(redraw) = redraw else {
                        debug!("redraw channel closed");
                        return Ok(());
                    };

                    self.redraw(redraw)?;
                }
            }
        }
    }

    fn apply(&mut self, action: Action) -> Flow {
        let changed = match action {
            Action::SpeedUp => self.clock.speed_up(),
            Action::SlowDown => self.clock.slow_down(),
            Action::Quit => return Flow::Quit,
        };

        if changed {
            let delay = self.clock.delay();
            debug!(?delay, "motion delay changed");

            // the mover only exits when this sender is gone
            let _ = self.delays.send(delay);
        }

        Flow::Continue
    }

    fn redraw(&mut self, redraw: Redraw) -> Result<()> {
        let size = (self.size)()?;

        match redraw {
            Redraw::Tick(now) => self.clock.set_time(now),
            Redraw::Step => {
                if let Some(edge) = self.clock.step(size, &mut self.rng) {
                    trace!(
                        ?edge,
                        position = ?self.clock.position(),
                        direction = ?self.clock.direction(),
                        "bounce"
                    );
                }
            }
        }

        self.printer.draw(&self.clock, size)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use crossbeam_channel::{bounded, unbounded};

    use super::*;
    use crate::xoshiro256p::Xoshiro256p;

    fn small_screen() -> io::Result<(u16, u16)> {
        Ok((40, 20))
    }

    fn app() -> (App<Vec<u8>, Xoshiro256p>, Receiver<Duration>) {
        let (delay_tx, delay_rx) = unbounded();
        let app = App::new(
            ClockConfig::default(),
            Printer::with_writer(Vec::new()),
            Xoshiro256p::new(5),
            delay_tx,
            small_screen,
        )
        .unwrap();

        (app, delay_rx)
    }

    fn output(app: &App<Vec<u8>, Xoshiro256p>) -> String {
        String::from_utf8(app.printer.get_ref().clone()).unwrap()
    }

    #[test]
    fn quit_ends_the_loop_without_drawing() {
        let (mut app, _delays) = app();
        let (_redraw_tx, redraw_rx) = bounded::<Redraw>(1);
        let (action_tx, action_rx) = bounded(4);

        action_tx.send(Action::Quit).unwrap();
        app.run(&redraw_rx, &action_rx).unwrap();

        assert!(output(&app).is_empty());
    }

    #[test]
    fn speed_changes_reach_the_mover() {
        let (mut app, delays) = app();
        let (_redraw_tx, redraw_rx) = bounded::<Redraw>(1);
        let (action_tx, action_rx) = bounded(8);

        for action in [Action::SpeedUp, Action::SpeedUp, Action::SpeedUp, Action::SlowDown, Action::Quit] {
            action_tx.send(action).unwrap();
        }
        app.run(&redraw_rx, &action_rx).unwrap();

        let sent: Vec<u128> = delays.try_iter().map(|d| d.as_millis()).collect();
        assert_eq!(sent, [400, 200, 100, 200]);
    }

    #[test]
    fn blocked_changes_are_not_forwarded() {
        let (mut app, delays) = app();
        let (_redraw_tx, redraw_rx) = bounded::<Redraw>(1);
        let (action_tx, action_rx) = bounded(16);

        for _ in 0..4 {
            action_tx.send(Action::SlowDown).unwrap();
        }
        action_tx.send(Action::Quit).unwrap();
        app.run(&redraw_rx, &action_rx).unwrap();

        // 1.6s, 3.2s, 6.4s, then the ceiling holds
        assert_eq!(delays.try_iter().count(), 3);
        assert_eq!(app.clock.delay(), Duration::from_millis(6400));
    }

    #[test]
    fn redraws_render_until_producers_stop() {
        let (mut app, _delays) = app();
        let (redraw_tx, redraw_rx) = bounded(4);
        let (_action_tx, action_rx) = bounded::<Action>(1);

        let now = Local.with_ymd_and_hms(2024, 3, 5, 23, 59, 58).unwrap();
        redraw_tx.send(Redraw::Tick(now)).unwrap();
        redraw_tx.send(Redraw::Step).unwrap();
        drop(redraw_tx);

        let start = app.clock.position();
        app.run(&redraw_rx, &action_rx).unwrap();

        let out = output(&app);
        assert_eq!(out.matches("23:59:58").count(), 2);
        assert_ne!(app.clock.position(), start);
        assert!(app.clock.border().is_some());
    }

    #[test]
    fn size_query_failure_is_an_error() {
        fn broken() -> io::Result<(u16, u16)> {
            Err(io::Error::other("no tty"))
        }

        let (delay_tx, _delay_rx) = unbounded();
        let app = App::new(
            ClockConfig::default(),
            Printer::with_writer(Vec::new()),
            Xoshiro256p::new(5),
            delay_tx,
            broken,
        );

        assert!(matches!(app, Err(crate::error::Error::Terminal(_))));
    }
}
