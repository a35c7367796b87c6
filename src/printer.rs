//! Immediate paragraph printing
//!
//! Breaks the text into lines and draws every glyph straight away. There is
//! no pacing and no way to interrupt; printing stops at the terminator.

use crate::charmap::INVISIBLE;
use crate::context::TextRenderContext;
use crate::error::TextError;
use crate::font::FontTable;
use crate::glyph_renderer::draw_glyph;
use crate::line_breaker::break_line;
use crate::surface_trait::GlyphSurface;
use crate::word_scanner::scan_word;
use log::debug;

/// Where a direct print left off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectPrint {
    /// x just past the last glyph drawn
    pub last_x: u16,
    /// Number of lines laid out
    pub lines: usize,
}

/// Glyph used for characters the font cannot draw
pub const REPLACEMENT_CHAR: u8 = b'?';

/// Turn free-form text into printable engine bytes
///
/// Characters without a glyph in both the normal and highlighted sets become
/// `REPLACEMENT_CHAR`, one per character, or are dropped if the font lacks
/// that too. A 0x00 terminator is appended when the text has none.
pub fn prepare_text(ctx: &TextRenderContext, font: &FontTable, text: &str) -> Vec<u8> {
    let drawable = |c: u8| {
        let c = ctx.remap(c);
        c == INVISIBLE || (font.has_glyph(c, ctx.char_shift) && font.has_glyph(c, ctx.preview_shift))
    };
    let replacement = drawable(REPLACEMENT_CHAR).then_some(REPLACEMENT_CHAR);
    let mut bytes: Vec<u8> = text
        .chars()
        .filter_map(|ch| match u8::try_from(ch) {
            Ok(c) if ctx.is_terminator(c) || c == b' ' || drawable(c) => Some(c),
            _ => {
                debug!("No glyph for {:?}", ch);
                replacement
            }
        })
        .collect();
    if !bytes.iter().any(|&c| ctx.is_terminator(c)) {
        bytes.push(0);
    }
    bytes
}

/// Bytes to draw for a line, never zero
///
/// A single word wider than the line would otherwise be retried forever, so
/// it goes on a line of its own.
pub(crate) fn line_length(
    ctx: &TextRenderContext,
    font: &FontTable,
    text: &[u8],
    index: usize,
    char_count: usize,
) -> Result<usize, TextError> {
    if char_count > 0 {
        return Ok(char_count);
    }
    let word = scan_word(ctx, font, text, index)?;
    debug!("Word at {} is wider than the line, placing it alone", index);
    Ok(word.char_count)
}

/// Print `text` at (x, *y) wrapped to `max_width`
///
/// `*y` is advanced by `ctx.line_spacing` for every completed line and is
/// left on the last line drawn.
#[allow(clippy::too_many_arguments)]
pub fn print_direct<S: GlyphSurface + ?Sized>(
    ctx: &TextRenderContext,
    font: &FontTable,
    surface: &mut S,
    text: &[u8],
    x: u16,
    y: &mut u16,
    max_width: u16,
    centered: bool,
) -> Result<DirectPrint, TextError> {
    let mut index = 0usize;
    let mut result = DirectPrint { last_x: x, lines: 0 };

    loop {
        let line = break_line(ctx, font, text, index, max_width, centered)?;
        result.lines += 1;
        let count = line_length(ctx, font, text, index, line.char_count)?;
        let mut cursor = x.wrapping_add(line.x_offset);

        for _ in 0..count {
            let raw = text.get(index).copied().unwrap_or(0);
            index += 1;
            if ctx.is_terminator(raw) {
                debug!("print_direct: {} lines, ended at y={}", result.lines, *y);
                return Ok(result);
            }
            let next = text.get(index).copied().unwrap_or(0);
            draw_glyph(ctx, surface, &mut cursor, *y, ctx.remap(raw), next)?;
            result.last_x = cursor;
        }
        *y = y.wrapping_add(ctx.line_spacing);
    }
}
