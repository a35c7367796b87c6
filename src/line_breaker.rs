//! Line breaking and centering
//!
//! Words are packed onto a line while `total + word - 10 < max_width`. The
//! 10 px slack and the two centering formulas must stay as they are for
//! screens to match the game's own output pixel for pixel.

use crate::charmap::INVISIBLE;
use crate::context::TextRenderContext;
use crate::error::TextError;
use crate::font::{kern_chars, width_of, FontTable};
use crate::word_scanner::scan_word;
use log::debug;

/// Allowance subtracted from the running width before comparing
pub const RIGHT_MARGIN: i64 = 10;

/// How a line ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    /// The text terminator was reached
    EndOfText,
    /// The next word did not fit and was left for the next line
    Overflow,
}

/// Result of breaking one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBreak {
    /// Bytes belonging to this line, delimiters included
    pub char_count: usize,
    /// Horizontal offset to add to the line's x origin
    pub x_offset: u16,
    /// Measured width of the words on the line
    pub width: u32,
    pub end: LineEnd,
}

/// Positioned glyphs of one line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineLayout {
    /// (character, x) for every visible glyph, x including the centering offset
    pub glyphs: Vec<(u8, u16)>,
    pub char_count: usize,
    /// Pixels left between the end of the line and `max_width`
    pub leftover_width: u16,
}

/// Game scripts store "centered" in bit 0 of the width byte
#[inline]
pub fn centered_flag(width_byte: u8) -> bool {
    width_byte & 1 != 0
}

/// Centering offset when the line ends with the text
pub fn centre_offset_end(max_width: u16, total_width: u32) -> u16 {
    let ax = ((max_width & 0xfffe) as i64 + 2 + 20 - total_width as i64) / 2;
    ax.clamp(0, u16::MAX as i64) as u16
}

/// Centering offset when the line ends because the next word overflowed
pub fn centre_offset_overflow(max_width: u16, total_width: u32) -> u16 {
    let ax = ((max_width & 0xfffe) as i64 - total_width as i64 + 20) / 2;
    ax.clamp(0, u16::MAX as i64) as u16
}

/// Work out how many bytes from `start` fit on one line of `max_width`
pub fn break_line(
    ctx: &TextRenderContext,
    font: &FontTable,
    text: &[u8],
    start: usize,
    max_width: u16,
    centered: bool,
) -> Result<LineBreak, TextError> {
    let mut total_width: u32 = 0;
    let mut char_count: usize = 0;
    let mut index = start;
    let budget = max_width as i64;

    loop {
        let word = scan_word(ctx, font, text, index)?;
        index += word.char_count;
        let fits = total_width as i64 + word.width as i64 - RIGHT_MARGIN < budget;

        if word.done {
            if fits {
                total_width += word.width;
                char_count += word.char_count;
            }
            let x_offset = if centered {
                centre_offset_end(max_width, total_width)
            } else {
                0
            };
            debug!(
                "break_line @{}: end of text, {} chars, width {}, offset {}",
                start, char_count, total_width, x_offset
            );
            return Ok(LineBreak {
                char_count,
                x_offset,
                width: total_width,
                end: LineEnd::EndOfText,
            });
        }

        if !fits {
            let x_offset = if centered {
                centre_offset_overflow(max_width, total_width)
            } else {
                0
            };
            debug!(
                "break_line @{}: wrap after {} chars, width {}, offset {}",
                start, char_count, total_width, x_offset
            );
            return Ok(LineBreak {
                char_count,
                x_offset,
                width: total_width,
                end: LineEnd::Overflow,
            });
        }

        total_width += word.width;
        char_count += word.char_count;
    }
}

/// Break one line and position its glyphs using font metrics
pub fn layout_line(
    ctx: &TextRenderContext,
    font: &FontTable,
    text: &[u8],
    start: usize,
    max_width: u16,
    centered: bool,
) -> Result<LineLayout, TextError> {
    let line = break_line(ctx, font, text, start, max_width, centered)?;
    let mut glyphs = Vec::new();
    let mut x = line.x_offset;

    for pos in start..start + line.char_count {
        let raw = text.get(pos).copied().unwrap_or(0);
        if ctx.is_terminator(raw) {
            break;
        }
        let c = ctx.remap(raw);
        if c == INVISIBLE {
            continue;
        }
        glyphs.push((c, x));
        let mut w = width_of(ctx, font, c)?;
        if ctx.kerning {
            w = kern_chars(c, text.get(pos + 1).copied().unwrap_or(0), w);
        }
        x = x.saturating_add(w as u16);
    }

    Ok(LineLayout {
        glyphs,
        char_count: line.char_count,
        leftover_width: max_width.saturating_sub(x),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BUILTIN_FONT;
    use crate::word_scanner::DELIMITER_WIDTH;
    use test_log::test;

    fn brk(text: &[u8], max_width: u16, centered: bool) -> LineBreak {
        break_line(&TextRenderContext::default(), &BUILTIN_FONT, text, 0, max_width, centered).unwrap()
    }

    #[test]
    fn short_text_fits_on_one_line() {
        let line = brk(b"go north:", 200, false);
        assert_eq!(line.end, LineEnd::EndOfText);
        assert_eq!(line.char_count, 9);
        assert_eq!(line.x_offset, 0);
    }

    #[test]
    fn overflowing_word_is_left_for_next_line() {
        // "mmmm " is 4 * 7 + 6 = 34 px
        let text = b"mmmm mmmm mmmm mmmm:";
        let line = brk(text, 60, false);
        assert_eq!(line.end, LineEnd::Overflow);
        // 34 - 10 < 60, 68 - 10 < 60, 102 - 10 >= 60
        assert_eq!(line.char_count, 10);
        assert_eq!(line.width, 68);

        let rest = break_line(&TextRenderContext::default(), &BUILTIN_FONT, text, 10, 60, false).unwrap();
        assert_eq!(rest.end, LineEnd::EndOfText);
        assert_eq!(rest.char_count, 10);
    }

    #[test]
    fn margin_boundary() {
        // One word of exactly 34 px: fits when 34 - 10 < max
        assert_eq!(brk(b"mmmm:", 25, false).char_count, 5);
        assert_eq!(brk(b"mmmm:", 24, false).char_count, 0);
    }

    #[test]
    fn final_word_dropped_when_too_wide() {
        // 20 + 62 - 10 >= 40: the last word is left out of the count
        let line = brk(b"mm mmmmmmmm:", 40, false);
        assert_eq!(line.end, LineEnd::EndOfText);
        assert_eq!(line.char_count, 3);
        assert_eq!(line.width, 20);

        let line = brk(b"mmmmmmmmmm:", 40, false);
        assert_eq!(line.end, LineEnd::EndOfText);
        assert_eq!(line.char_count, 0);
        assert_eq!(line.width, 0);
    }

    #[test]
    fn centering_constants_differ_per_path() {
        assert_eq!(centre_offset_end(100, 0), 61);
        assert_eq!(centre_offset_overflow(100, 0), 60);
        // Odd widths are masked to even first
        assert_eq!(centre_offset_end(101, 0), 61);
        assert_eq!(centre_offset_overflow(101, 0), 60);
    }

    #[test]
    fn centering_through_break_line() {
        // 15 * 7 + 6 = 111 px, 101 >= 100 so the word never fits
        let long = b"mmmmmmmmmmmmmmm";
        let mut end_text = long.to_vec();
        end_text.push(b':');
        let line = brk(&end_text, 100, true);
        assert_eq!(line.end, LineEnd::EndOfText);
        assert_eq!(line.x_offset, 61);

        let mut wrap_text = long.to_vec();
        wrap_text.extend_from_slice(b" more:");
        let line = brk(&wrap_text, 100, true);
        assert_eq!(line.end, LineEnd::Overflow);
        assert_eq!(line.x_offset, 60);
    }

    #[test]
    fn centered_line_offset() {
        // "hi:" = 5 + 2 + 6 = 13 px
        let line = brk(b"hi:", 100, true);
        assert_eq!(line.width, 13);
        assert_eq!(line.x_offset, (100 + 22 - 13) / 2);
        assert_eq!(brk(b"hi:", 100, false).x_offset, 0);
    }

    #[test]
    fn width_flag_bit() {
        assert!(centered_flag(201));
        assert!(!centered_flag(200));
    }

    #[test]
    fn layout_positions_glyphs() {
        let ctx = TextRenderContext::default();
        let layout = layout_line(&ctx, &BUILTIN_FONT, b"hi you:", 0, 200, false).unwrap();
        let xs: Vec<(u8, u16)> = layout.glyphs.clone();
        assert_eq!(
            xs,
            vec![(b'h', 0), (b'i', 5), (b' ', 7), (b'y', 10), (b'o', 15), (b'u', 20)]
        );
        assert_eq!(layout.char_count, 7);
        assert_eq!(layout.leftover_width, 200 - 25);
    }

    #[test]
    fn layout_skips_invisible_glyphs() {
        let ctx = TextRenderContext::default();
        let layout = layout_line(&ctx, &BUILTIN_FONT, b"a\xffb:", 0, 200, false).unwrap();
        assert_eq!(layout.glyphs, vec![(b'a', 0), (b'b', 5)]);
        assert_eq!(layout.char_count, 4);
    }

    #[test]
    fn delimiter_width_counts_towards_budget() {
        // "a " alone is 5 + 6 = 11 px
        let line = brk(b"a:", 2, false);
        assert_eq!(line.char_count, 2);
        assert_eq!(line.width, 5 + DELIMITER_WIDTH);
    }

    #[test]
    fn oversized_word_longer_than_sixteen_bits() {
        // 10 000 * 7 px does not fit in any u16 width
        let mut text = vec![b'm'; 10_000];
        text.extend_from_slice(b" ab:");
        let line = brk(&text, 200, true);
        assert_eq!(line.end, LineEnd::Overflow);
        assert_eq!(line.char_count, 0);
        assert_eq!(line.width, 0);

        let rest = break_line(&TextRenderContext::default(), &BUILTIN_FONT, &text, 10_001, 200, false).unwrap();
        assert_eq!(rest.end, LineEnd::EndOfText);
        assert_eq!(rest.char_count, 3);
    }

    #[test]
    fn centering_clamps_instead_of_wrapping() {
        assert_eq!(centre_offset_end(100, 70_006), 0);
        assert_eq!(centre_offset_overflow(u16::MAX, 0), 32_777);
    }
}
