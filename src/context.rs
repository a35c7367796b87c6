//! Font selection and layout state shared by every text call

use crate::charmap::CharMap;
use crate::font::PREVIEW_SHIFT;

/// Default text terminator besides 0x00
pub const DEFAULT_STOP_BYTE: u8 = b':';

/// Vertical step between lines of paced text
pub const SLOW_LINE_STEP: u16 = 10;

/// Mutable font/kerning/layout selection
///
/// Callers own the context and pass it by reference into every measuring or
/// drawing call. Temporary changes to the glyph set must go through
/// [`TextRenderContext::with_char_shift`] so they never outlive the call that
/// needed them.
#[derive(Debug, Clone)]
pub struct TextRenderContext {
    /// Frame offset of the active glyph set
    pub char_shift: u16,
    /// Apply kerning exceptions when advancing the cursor after a glyph, so
    /// drawn text matches its measured width
    pub kerning: bool,
    /// Localized releases import a taller glyph set drawn 3 px higher
    pub foreign_release: bool,
    /// Vertical step between lines of directly printed text
    pub line_spacing: u16,
    /// Byte that ends text like 0x00 does
    pub stop_byte: u8,
    /// Glyph set used for the look-ahead character of paced text
    pub preview_shift: u16,
    /// Vertical step between lines of paced text
    pub slow_line_step: u16,
    pub char_map: CharMap,
}

impl Default for TextRenderContext {
    fn default() -> Self {
        TextRenderContext {
            char_shift: 0,
            kerning: true,
            foreign_release: false,
            line_spacing: 10,
            stop_byte: DEFAULT_STOP_BYTE,
            preview_shift: PREVIEW_SHIFT,
            slow_line_step: SLOW_LINE_STEP,
            char_map: CharMap::identity(),
        }
    }
}

impl TextRenderContext {
    /// True for 0x00 and the stop byte
    #[inline]
    pub fn is_terminator(&self, c: u8) -> bool {
        c == 0 || c == self.stop_byte
    }

    #[inline]
    pub fn remap(&self, c: u8) -> u8 {
        self.char_map.remap(c)
    }

    /// Run `f` with a different glyph set selected, restoring the previous
    /// shift afterwards even if `f` returns early with an error
    pub fn with_char_shift<R>(&mut self, shift: u16, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.char_shift;
        self.char_shift = shift;
        let result = f(self);
        self.char_shift = saved;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn terminators() {
        let mut ctx = TextRenderContext::default();
        assert!(ctx.is_terminator(0));
        assert!(ctx.is_terminator(b':'));
        assert!(!ctx.is_terminator(b' '));
        ctx.stop_byte = b'$';
        assert!(!ctx.is_terminator(b':'));
        assert!(ctx.is_terminator(b'$'));
    }

    #[test]
    fn char_shift_is_restored() {
        let mut ctx = TextRenderContext::default();
        ctx.char_shift = 7;
        let seen: Result<u16, String> = ctx.with_char_shift(91, |ctx| {
            assert_eq!(ctx.char_shift, 91);
            Err("backend failed".to_string())
        });
        assert!(seen.is_err());
        assert_eq!(ctx.char_shift, 7);
    }
}
