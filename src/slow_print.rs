//! Paced, interruptible text presentation
//!
//! Characters appear one at a time. After each one the following character
//! is flashed in the highlighted glyph set, then the printer waits two frames.
//! A fresh button press during a wait abandons the rest of the text.
//!
//! [`SlowPrint`] is a state machine a game loop can step once per frame with
//! [`SlowPrint::tick`]; [`print_slow`] drives it to completion against a
//! frame clock and input poller.

use crate::context::TextRenderContext;
use crate::error::TextError;
use crate::font::FontTable;
use crate::glyph_renderer::print_both;
use crate::line_breaker::break_line;
use crate::printer::line_length;
use crate::surface_trait::{FrameClock, GlyphSurface, InputPoller};
use log::{debug, info};

/// Frames waited after each previewed character
pub const FRAMES_PER_CHAR: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlowState {
    /// Ready to draw the next character
    Running,
    /// Waiting for frames to elapse before the next character
    WaitingFrame { frames_left: u8 },
    /// Abandoned because of new input
    Interrupted,
    /// All text has been drawn
    Done,
}

/// How a paced print ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlowOutcome {
    Finished,
    Interrupted,
}

/// In-progress paced print
#[derive(Debug)]
pub struct SlowPrint<'t> {
    text: &'t [u8],
    index: usize,
    origin_x: u16,
    y: u16,
    max_width: u16,
    centered: bool,
    cursor_x: u16,
    line_remaining: usize,
    lines: usize,
    old_button: u16,
    state: SlowState,
}

impl<'t> SlowPrint<'t> {
    /// `old_button` is the button state at the moment printing starts, so a
    /// button still held from the click that triggered the text is ignored
    pub fn new(text: &'t [u8], x: u16, y: u16, max_width: u16, centered: bool, old_button: u16) -> Self {
        SlowPrint {
            text,
            index: 0,
            origin_x: x,
            y,
            max_width,
            centered,
            cursor_x: x,
            line_remaining: 0,
            lines: 0,
            old_button,
            state: SlowState::Running,
        }
    }

    pub fn state(&self) -> SlowState {
        self.state
    }

    /// y of the line currently being drawn
    pub fn y(&self) -> u16 {
        self.y
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    fn byte(&self, pos: usize) -> u8 {
        self.text.get(pos).copied().unwrap_or(0)
    }

    /// Draw the next character, and its preview when one is due
    ///
    /// Does nothing unless the state is `Running`.
    pub fn advance<S: GlyphSurface + ?Sized>(
        &mut self,
        ctx: &mut TextRenderContext,
        font: &FontTable,
        surface: &mut S,
    ) -> Result<SlowState, TextError> {
        if self.state != SlowState::Running {
            return Ok(self.state);
        }

        if self.line_remaining == 0 {
            let line = break_line(ctx, font, self.text, self.index, self.max_width, self.centered)?;
            self.line_remaining = line_length(ctx, font, self.text, self.index, line.char_count)?;
            self.cursor_x = self.origin_x.wrapping_add(line.x_offset);
            self.lines += 1;
        }

        let c0 = self.byte(self.index);
        if ctx.is_terminator(c0) {
            self.state = SlowState::Done;
            return Ok(self.state);
        }
        let c1 = self.byte(self.index + 1);
        print_both(ctx, surface, &mut self.cursor_x, self.y, ctx.remap(c0), c1)?;
        self.index += 1;

        if ctx.is_terminator(c1) {
            debug!("print_slow: finished after {} lines", self.lines);
            self.state = SlowState::Done;
            return Ok(self.state);
        }

        if self.line_remaining != 1 {
            let mut preview_x = self.cursor_x;
            let y = self.y;
            let after = self.byte(self.index + 1);
            let preview = ctx.remap(c1);
            let shift = ctx.preview_shift;
            ctx.with_char_shift(shift, |ctx| {
                print_both(ctx, surface, &mut preview_x, y, preview, after)
            })?;
            self.state = SlowState::WaitingFrame {
                frames_left: FRAMES_PER_CHAR,
            };
        }

        self.line_remaining -= 1;
        if self.line_remaining == 0 {
            self.y = self.y.wrapping_add(ctx.slow_line_step);
        }
        Ok(self.state)
    }

    /// Account for one elapsed frame and the button state read during it
    pub fn on_frame(&mut self, button: u16) -> SlowState {
        if let SlowState::WaitingFrame { frames_left } = self.state {
            let previous = self.old_button;
            self.old_button = button;
            if button != 0 && button != previous {
                info!("print_slow: interrupted by button {:#x}", button);
                self.state = SlowState::Interrupted;
            } else if frames_left <= 1 {
                self.state = SlowState::Running;
            } else {
                self.state = SlowState::WaitingFrame {
                    frames_left: frames_left - 1,
                };
            }
        }
        self.state
    }

    /// Per-frame step for callers running their own frame loop
    ///
    /// Consumes the frame if waiting, then draws until the next wait or the
    /// end of the text.
    pub fn tick<S: GlyphSurface + ?Sized>(
        &mut self,
        ctx: &mut TextRenderContext,
        font: &FontTable,
        surface: &mut S,
        button: u16,
    ) -> Result<SlowState, TextError> {
        if let SlowState::WaitingFrame { .. } = self.state {
            self.on_frame(button);
        }
        while self.state == SlowState::Running {
            self.advance(ctx, font, surface)?;
        }
        Ok(self.state)
    }
}

/// Print `text` at (x, y) one character at a time until it is finished or
/// new input arrives
#[allow(clippy::too_many_arguments)]
pub fn print_slow<S, C, I>(
    ctx: &mut TextRenderContext,
    font: &FontTable,
    surface: &mut S,
    clock: &mut C,
    input: &mut I,
    text: &[u8],
    x: u16,
    y: u16,
    max_width: u16,
    centered: bool,
) -> Result<SlowOutcome, TextError>
where
    S: GlyphSurface + ?Sized,
    C: FrameClock + ?Sized,
    I: InputPoller + ?Sized,
{
    let mut job = SlowPrint::new(text, x, y, max_width, centered, input.current_button());
    loop {
        match job.advance(ctx, font, surface)? {
            SlowState::Running => {}
            SlowState::WaitingFrame { .. } => {
                clock.wait_frame()?;
                job.on_frame(input.poll_button());
            }
            SlowState::Done => return Ok(SlowOutcome::Finished),
            SlowState::Interrupted => return Ok(SlowOutcome::Interrupted),
        }
    }
}
