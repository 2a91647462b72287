use core::time::Duration;

use chrono::{DateTime, Local};

use crate::{config::ClockConfig, xoshiro256p::RandomSource};

/// Border colors a step can pick from, the terminal's standard palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl BorderColor {
    pub const ALL: [BorderColor; 7] = [
        BorderColor::Red,
        BorderColor::Green,
        BorderColor::Yellow,
        BorderColor::Blue,
        BorderColor::Magenta,
        BorderColor::Cyan,
        BorderColor::White,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which reversal of the boundary chain fired during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Right,
    Left,
    Bottom,
    Top,
}

/// Widget rectangle in signed cell coordinates, may hang off screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

pub struct ClockState {
    /// Displayed time
    now: DateTime<Local>,

    /// Top-left corner of the widget (col, row)
    pos: (i32, i32),
    /// Step sign per axis, always -1 or 1
    dir: (i32, i32),

    delay: Duration,

    /// None until the first step picks a color
    border: Option<BorderColor>,

    config: ClockConfig,
}

impl ClockState {
    /// Random start that keeps the widget on a `size` (cols, rows) screen
    pub fn new<R>(config: ClockConfig, now: DateTime<Local>, size: (u16, u16), rng: &mut R) -> Self
    where
        R: RandomSource + ?Sized,
    {
        let free_cols = size.0.saturating_sub(config.width) as usize;
        let free_rows = size.1.saturating_sub(config.height) as usize;

        ClockState {
            now,
            pos: (rng.below(free_cols) as i32, rng.below(free_rows) as i32),
            dir: (1, 1),
            delay: config.initial_delay,
            border: None,
            config,
        }
    }

    pub fn set_time(&mut self, now: DateTime<Local>) {
        self.now = now;
    }

    /// One motion step on a `size` screen: move along a random axis, run
    /// the boundary chain, pick a new border color.
    pub fn step<R>(&mut self, size: (u16, u16), rng: &mut R) -> Option<Edge>
    where
        R: RandomSource + ?Sized,
    {
        let axis = match rng.below(2) {
            0 => Axis::Horizontal,
            _ => Axis::Vertical,
        };
        self.advance(axis);

        let edge = self.bounce(size);

        self.border = Some(BorderColor::ALL[rng.below(BorderColor::ALL.len())]);

        edge
    }

    fn advance(&mut self, axis: Axis) {
        match axis {
            Axis::Horizontal => self.pos.0 += self.dir.0,
            Axis::Vertical => self.pos.1 += self.dir.1,
        }
    }

    // Only the first matching edge reverses, so an x reversal can hide a
    // pending y reversal for a step. Checked on the already moved position.
    fn bounce(&mut self, size: (u16, u16)) -> Option<Edge> {
        let (x, y) = self.pos;
        let (max_x, max_y) = (i32::from(size.0), i32::from(size.1));

        if x + i32::from(self.config.width) >= max_x {
            self.dir.0 = -1;
            Some(Edge::Right)
        } else if x <= 0 {
            self.dir.0 = 1;
            Some(Edge::Left)
        } else if y + i32::from(self.config.height) >= max_y {
            self.dir.1 = -1;
            Some(Edge::Bottom)
        } else if y <= 0 {
            self.dir.1 = 1;
            Some(Edge::Top)
        } else {
            None
        }
    }

    /// Halve the delay unless that would reach the floor
    pub fn speed_up(&mut self) -> bool {
        let halved = self.delay / 2;
        if halved <= self.config.min_delay {
            return false;
        }

        self.delay = halved;
        true
    }

    /// Double the delay unless that would reach the ceiling
    pub fn slow_down(&mut self) -> bool {
        let doubled = self.delay.saturating_mul(2);
        if doubled >= self.config.max_delay {
            return false;
        }

        self.delay = doubled;
        true
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn position(&self) -> (i32, i32) {
        self.pos
    }

    pub fn direction(&self) -> (i32, i32) {
        self.dir
    }

    pub fn border(&self) -> Option<BorderColor> {
        self.border
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.pos.0,
            y: self.pos.1,
            width: self.config.width,
            height: self.config.height,
        }
    }

    /// `HH:MM:SS`
    pub fn time_text(&self) -> String {
        self.now.format("%H:%M:%S").to_string()
    }

    #[cfg(test)]
    pub(crate) fn placed(mut self, pos: (i32, i32), dir: (i32, i32)) -> Self {
        self.pos = pos;
        self.dir = dir;
        self
    }
}
