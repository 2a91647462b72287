use std::io::{Stdout, Write, stdout};

use termion::{
    clear,
    color::{self, AnsiValue},
    cursor::{self, HideCursor},
    raw::{IntoRawMode, RawTerminal},
    screen::{AlternateScreen, IntoAlternateScreen},
    style,
};

use crate::{
    IOResult,
    clock::{BorderColor, ClockState, Rect},
};

/// Raw-mode alternate screen with a hidden cursor, all undone on drop
pub type Screen = HideCursor<AlternateScreen<RawTerminal<Stdout>>>;

pub struct Printer<W: Write> {
    /// Terminal size at the last draw
    size: (u16, u16),

    /// Rectangle drawn last, erased before the next draw
    last: Option<Rect>,

    out: W,
}

impl Printer<Screen> {
    pub fn new() -> Result<Self, std::io::Error> {
        let out = HideCursor::from(stdout().into_raw_mode()?.into_alternate_screen()?);

        Ok(Self::with_writer(out))
    }
}

/// Public methods
impl<W: Write> Printer<W> {
    pub fn with_writer(out: W) -> Self {
        Printer {
            size: (0, 0),
            last: None,
            out,
        }
    }

    /// Draw the clock on a `size` (cols, rows) screen and flush once
    pub fn draw(&mut self, clock: &ClockState, size: (u16, u16)) -> IOResult {
        if size != self.size {
            write!(self.out, "{}{}", style::Reset, clear::All)?;
            self.size = size;
            self.last = None;
        }

        if let Some(last) = self.last.take() {
            self.erase(last)?;
        }

        let rect = clock.rect();
        let border = border_fg(clock.border());
        let text: Vec<char> = clock.time_text().chars().collect();

        for row in 0..rect.height {
            let edge_row = row == 0 || row + 1 == rect.height;

            let Some((y, cols)) = self.visible(rect, row) else {
                continue;
            };
            write!(self.out, "{}", cursor::Goto(cols.start as u16 + 1, y + 1))?;

            let mut on_border = None;
            for col in cols {
                let dx = (col - rect.x) as u16;
                let edge_col = dx == 0 || dx + 1 == rect.width;
                let is_border = edge_row || edge_col;

                if on_border != Some(is_border) {
                    if is_border {
                        write!(self.out, "{border}")?;
                    } else {
                        write!(self.out, "{}", color::Fg(color::Reset))?;
                    }
                    on_border = Some(is_border);
                }

                let c = match (row, dx) {
                    (0, 0) => '┌',
                    (0, _) if edge_col => '┐',
                    (r, 0) if r + 1 == rect.height => '└',
                    (r, _) if r + 1 == rect.height && edge_col => '┘',
                    _ if edge_row => '─',
                    _ if edge_col => '│',
                    // time sits on the first interior row
                    (1, _) => text.get(dx as usize - 1).copied().unwrap_or(' '),
                    _ => ' ',
                };
                write!(self.out, "{c}")?;
            }
        }

        write!(self.out, "{}", style::Reset)?;
        self.last = Some(rect);

        self.out.flush()
    }

    #[cfg(test)]
    pub(crate) fn get_ref(&self) -> &W {
        &self.out
    }
}

/// Private methods
impl<W: Write> Printer<W> {
    fn erase(&mut self, rect: Rect) -> IOResult {
        for row in 0..rect.height {
            if let Some((y, cols)) = self.visible(rect, row) {
                let pos = cursor::Goto(cols.start as u16 + 1, y + 1);
                let fill = " ".repeat(cols.len());

                write!(self.out, "{pos}{fill}")?;
            }
        }

        Ok(())
    }

    /// Screen row and on-screen column span of one rectangle row, None
    /// when the row is clipped away entirely
    fn visible(&self, rect: Rect, row: u16) -> Option<(u16, std::ops::Range<i32>)> {
        let (max_x, max_y) = (i32::from(self.size.0), i32::from(self.size.1));

        let y = rect.y + i32::from(row);
        if y < 0 || y >= max_y {
            return None;
        }

        let start = rect.x.max(0);
        let end = (rect.x + i32::from(rect.width)).min(max_x);
        if start >= end {
            return None;
        }

        Some((y as u16, start..end))
    }
}

fn border_fg(border: Option<BorderColor>) -> String {
    let value = match border {
        None => return color::Fg(color::Reset).to_string(),
        Some(BorderColor::Red) => 1,
        Some(BorderColor::Green) => 2,
        Some(BorderColor::Yellow) => 3,
        Some(BorderColor::Blue) => 4,
        Some(BorderColor::Magenta) => 5,
        Some(BorderColor::Cyan) => 6,
        Some(BorderColor::White) => 7,
    };

    color::Fg(AnsiValue(value)).to_string()
}
