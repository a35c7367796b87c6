//! Word measurement
//!
//! Text is split on single spaces. A word's width is the sum of its kerned
//! glyph widths plus a fixed advance for the delimiter that ended it.

use crate::charmap::INVISIBLE;
use crate::context::TextRenderContext;
use crate::error::TextError;
use crate::font::{kern_chars, width_of, FontTable};
use log::trace;

/// Pixel advance added for the space or terminator ending a word
pub const DELIMITER_WIDTH: u32 = 6;

/// Result of scanning one word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordScan {
    /// The word was ended by 0x00 or the stop byte, not by a space
    pub done: bool,
    /// Width in pixels, including the delimiter advance
    pub width: u32,
    /// Bytes consumed, including the delimiter; always at least 1
    pub char_count: usize,
}

/// Measure the word starting at `start`
///
/// The end of `text` counts as a terminator, so the scan never reads past
/// the buffer even when the text is not terminated. Counts are kept wide
/// enough that words longer than a screen measure without wrapping.
pub fn scan_word(
    ctx: &TextRenderContext,
    font: &FontTable,
    text: &[u8],
    start: usize,
) -> Result<WordScan, TextError> {
    let mut width: u32 = 0;
    let mut char_count: usize = 0;
    let mut pos = start;

    loop {
        let raw = text.get(pos).copied().unwrap_or(0);
        pos += 1;
        char_count += 1;

        if ctx.is_terminator(raw) {
            width = width.saturating_add(DELIMITER_WIDTH);
            trace!("scan_word @{}: end of text, width={} count={}", start, width, char_count);
            return Ok(WordScan { done: true, width, char_count });
        }
        if raw == b' ' {
            width = width.saturating_add(DELIMITER_WIDTH);
            trace!("scan_word @{}: width={} count={}", start, width, char_count);
            return Ok(WordScan { done: false, width, char_count });
        }

        let c = ctx.remap(raw);
        if c != INVISIBLE {
            // Kerning looks at the following byte as stored, before remapping
            let next = text.get(pos).copied().unwrap_or(0);
            let w = kern_chars(c, next, width_of(ctx, font, c)?);
            width = width.saturating_add(w as u32);
        }
    }
}
