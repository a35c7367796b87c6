//! Crossterm-backed glyph surface, input poller and frame clock
//!
//! Glyphs are proportional but terminal cells are not, so each row keeps
//! track of the last x drawn and hands out the next column whenever x moves
//! right. Highlighted look-ahead glyphs go into the column after the last
//! one and are overwritten when the real character arrives.

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyEventKind, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use log::debug;
use std::collections::HashMap;
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

use crate::font::{FontTable, FIRST_CHAR};
use crate::surface_trait::{FrameClock, GlyphSurface, InputPoller, RenderError};

/// Display refresh rate the games were paced against
pub const FRAMES_PER_SECOND: u64 = 70;

/// Pixel height of one terminal row
const ROW_PIXELS: u16 = 10;

/// Approximate pixel width of one terminal cell, for the first glyph of a row
const CELL_PIXELS: u16 = 5;

/// Draws glyphs as terminal cells
///
/// The cursor is hidden while the surface is alive. It is shown again by
/// `finish`, or on drop if printing bailed out early.
pub struct TerminalSurface<W: Write = Stdout> {
    stdout: W,
    font: FontTable,
    preview_shift: u16,
    /// Per pixel row: (last x drawn, its column)
    rows: HashMap<u16, (u16, u16)>,
    max_row: u16,
    finished: bool,
}

impl TerminalSurface {
    pub fn new(font: &FontTable, preview_shift: u16) -> Result<Self, RenderError> {
        Self::with_writer(io::stdout(), font, preview_shift)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn with_writer(mut stdout: W, font: &FontTable, preview_shift: u16) -> Result<Self, RenderError> {
        execute!(stdout, Hide, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(TerminalSurface {
            stdout,
            font: font.clone(),
            preview_shift,
            rows: HashMap::new(),
            max_row: 0,
            finished: false,
        })
    }

    fn glyph_char(&self, frame: u16) -> (char, bool) {
        let (index, preview) = if frame >= self.preview_shift {
            (frame - self.preview_shift, true)
        } else {
            (frame, false)
        };
        let c = (index as u8).wrapping_add(FIRST_CHAR);
        let c = if c.is_ascii_graphic() || c == b' ' { c as char } else { '?' };
        (c, preview)
    }

    fn column_for(&mut self, x: u16, y: u16, preview: bool) -> u16 {
        match self.rows.get(&y).copied() {
            None => {
                let col = x / CELL_PIXELS;
                if !preview {
                    self.rows.insert(y, (x, col));
                }
                col
            }
            Some((_, last_col)) if preview => last_col + 1,
            Some((last_x, last_col)) => {
                let col = if x > last_x { last_col + 1 } else { last_col };
                self.rows.insert(y, (x, col));
                col
            }
        }
    }

    /// Put the terminal cursor back below the drawn text
    pub fn finish(&mut self) -> Result<(), RenderError> {
        if self.finished {
            return Ok(());
        }
        execute!(self.stdout, MoveTo(0, self.max_row.saturating_add(1)), Show, Print("\r\n"))?;
        self.finished = true;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalSurface<W> {
    fn drop(&mut self) {
        if !self.finished {
            // Clean up terminal state
            let _ = execute!(self.stdout, Show, ResetColor);
        }
    }
}

impl<W: Write> GlyphSurface for TerminalSurface<W> {
    fn show_frame(&mut self, x: u16, y: u16, frame: u16) -> Result<(u8, u8), RenderError> {
        let glyph = *self
            .font
            .frame(frame)
            .ok_or_else(|| RenderError::new(format!("frame {} out of range", frame)))?;
        let (c, preview) = self.glyph_char(frame);
        let col = self.column_for(x, y, preview);
        let row = y / ROW_PIXELS;
        self.max_row = self.max_row.max(row);

        queue!(self.stdout, MoveTo(col, row))?;
        if preview {
            queue!(self.stdout, SetForegroundColor(Color::Yellow), Print(c), ResetColor)?;
        } else {
            queue!(self.stdout, Print(c))?;
        }
        Ok((glyph.width, glyph.height))
    }

    fn multi_dump(&mut self, _x: u16, _y: u16, _width: u8, _height: u8) -> Result<(), RenderError> {
        self.stdout.flush()?;
        Ok(())
    }
}

/// Keyboard and mouse presses read from crossterm events
///
/// Holds the terminal in raw mode while alive so key presses arrive without
/// waiting for Enter.
pub struct TerminalInput {
    in_raw_mode: bool,
    button: u16,
}

impl TerminalInput {
    pub fn new() -> Result<Self, RenderError> {
        terminal::enable_raw_mode()?;
        Ok(TerminalInput {
            in_raw_mode: true,
            button: 0,
        })
    }

    fn cleanup(&mut self) {
        if self.in_raw_mode {
            let _ = terminal::disable_raw_mode();
            self.in_raw_mode = false;
        }
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        self.cleanup();
    }
}

impl InputPoller for TerminalInput {
    fn current_button(&self) -> u16 {
        self.button
    }

    fn poll_button(&mut self) -> u16 {
        let mut button = 0;
        while let Ok(true) = event::poll(Duration::ZERO) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => button = 1,
                Ok(Event::Mouse(mouse)) => {
                    if let MouseEventKind::Down(b) = mouse.kind {
                        button = match b {
                            event::MouseButton::Left => 1,
                            event::MouseButton::Right => 2,
                            event::MouseButton::Middle => 4,
                        };
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("Event read error: {}", e);
                    break;
                }
            }
        }
        self.button = button;
        button
    }
}

/// Sleeps one display frame per tick
pub struct TerminalClock {
    frame: Duration,
}

impl TerminalClock {
    pub fn new() -> Self {
        TerminalClock {
            frame: Duration::from_millis(1000 / FRAMES_PER_SECOND),
        }
    }
}

impl Default for TerminalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for TerminalClock {
    fn wait_frame(&mut self) -> Result<(), RenderError> {
        thread::sleep(self.frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BUILTIN_FONT;
    use std::cell::RefCell;
    use std::rc::Rc;
    use test_log::test;

    const SHOW_CURSOR: &str = "\x1b[?25h";

    /// Writer whose output can be inspected after the surface is dropped
    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn drop_restores_cursor_when_not_finished() {
        let out = SharedBuffer::default();
        {
            let mut surface = TerminalSurface::with_writer(out.clone(), &BUILTIN_FONT, 91).unwrap();
            surface.show_frame(0, 0, (b'a' - 32) as u16).unwrap();
            assert!(!out.contents().contains(SHOW_CURSOR));
        }
        assert!(out.contents().contains(SHOW_CURSOR));
    }

    #[test]
    fn finish_restores_cursor_once() {
        let out = SharedBuffer::default();
        {
            let mut surface = TerminalSurface::with_writer(out.clone(), &BUILTIN_FONT, 91).unwrap();
            surface.finish().unwrap();
            surface.finish().unwrap();
        }
        assert_eq!(out.contents().matches(SHOW_CURSOR).count(), 1);
    }

    #[test]
    fn preview_glyph_goes_in_next_column() {
        let out = SharedBuffer::default();
        let mut surface = TerminalSurface::with_writer(out, &BUILTIN_FONT, 91).unwrap();
        surface.show_frame(10, 0, (b'a' - 32) as u16).unwrap();
        assert_eq!(surface.column_for(15, 0, true), 3);
        assert_eq!(surface.glyph_char(91 + (b'b' - 32) as u16), ('b', true));
        surface.finish().unwrap();
    }
}
