//! Font frame tables and glyph metrics
//!
//! A font is a table of frames. Printable characters start at code 32, so
//! character `c` lives at frame `c - 32 + char_shift`, where the shift selects
//! between several glyph sets loaded back to back (normal and highlighted).

use crate::charmap::INVISIBLE;
use crate::context::TextRenderContext;
use crate::error::TextError;
use log::warn;

/// Size of one frame record in the game data files
pub const FRAME_RECORD_SIZE: usize = 6;

/// First character code that has a frame
pub const FIRST_CHAR: u8 = 32;

/// Frame offset of the highlighted look-ahead glyph set
pub const PREVIEW_SHIFT: u16 = 91;

/// One entry of a font frame table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphFrame {
    pub width: u8,
    pub height: u8,
    /// Offset of the pixel data inside the graphics blob
    pub data_offset: u16,
    pub x_offset: u8,
    pub y_offset: u8,
}

/// The loaded frame table of a character set
#[derive(Debug, Clone, Default)]
pub struct FontTable {
    frames: Vec<GlyphFrame>,
}

lazy_static! {
    /// Proportional demo font with a normal set at shift 0 and a highlighted
    /// copy at `PREVIEW_SHIFT`
    pub static ref BUILTIN_FONT: FontTable = FontTable::builtin();
}

impl FontTable {
    pub fn new(frames: Vec<GlyphFrame>) -> Self {
        FontTable { frames }
    }

    /// Parse packed 6-byte frame records: width, height, data offset
    /// (little endian), x offset, y offset
    pub fn from_frame_bytes(data: &[u8]) -> Result<Self, TextError> {
        if data.len() % FRAME_RECORD_SIZE != 0 {
            return Err(TextError::BadFontTable(format!(
                "{} bytes is not a multiple of {}",
                data.len(),
                FRAME_RECORD_SIZE
            )));
        }
        let frames = data
            .chunks_exact(FRAME_RECORD_SIZE)
            .map(|rec| GlyphFrame {
                width: rec[0],
                height: rec[1],
                data_offset: u16::from_le_bytes([rec[2], rec[3]]),
                x_offset: rec[4],
                y_offset: rec[5],
            })
            .collect();
        Ok(FontTable { frames })
    }

    fn builtin() -> Self {
        // 91 glyphs, ' ' through 'z', so the highlighted copy starts exactly
        // at the preview shift
        let mut frames = Vec::with_capacity(PREVIEW_SHIFT as usize * 2);
        let normal: Vec<GlyphFrame> = (FIRST_CHAR..=b'z')
            .map(|c| GlyphFrame {
                width: builtin_width(c),
                height: 8,
                ..GlyphFrame::default()
            })
            .collect();
        frames.extend_from_slice(&normal);
        frames.extend_from_slice(&normal);
        FontTable { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: u16) -> Option<&GlyphFrame> {
        self.frames.get(index as usize)
    }

    /// Whether `code` has a frame under `char_shift`
    pub fn has_glyph(&self, code: u8, char_shift: u16) -> bool {
        code >= FIRST_CHAR && self.frame(frame_index(code, char_shift)).is_some()
    }
}

fn builtin_width(c: u8) -> u8 {
    match c {
        b' ' => 3,
        b'i' | b'l' | b'!' | b'.' | b',' | b'\'' | b':' | b';' => 2,
        b'j' | b't' | b'f' | b'r' | b'I' | b'(' | b')' => 4,
        b'm' | b'w' | b'M' | b'W' => 7,
        _ => 5,
    }
}

/// Frame index for a character under the given shift
#[inline]
pub fn frame_index(code: u8, char_shift: u16) -> u16 {
    (code as u16)
        .wrapping_sub(FIRST_CHAR as u16)
        .wrapping_add(char_shift)
}

/// Base pixel width of `code` in the active glyph set
/// Code 255 is invisible and has no width.
pub fn width_of(ctx: &TextRenderContext, font: &FontTable, code: u8) -> Result<u8, TextError> {
    if code == INVISIBLE {
        return Ok(0);
    }
    let frame = frame_index(code, ctx.char_shift);
    match font.frame(frame) {
        Some(glyph) if code >= FIRST_CHAR => Ok(glyph.width),
        _ => {
            warn!("No glyph for code {:#04x} (frame {})", code, frame);
            debug_assert!(false, "undefined glyph code {:#04x}", code);
            Err(TextError::UndefinedGlyph { code, frame })
        }
    }
}

/// Kerning exceptions: "a" or "u" before n, t, r, i or l close up by a pixel
pub fn kern_chars(first: u8, second: u8, width: u8) -> u8 {
    if (first == b'a' || first == b'u') && matches!(second, b'n' | b't' | b'r' | b'i' | b'l') {
        return width.wrapping_sub(1);
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn kerning_pairs() {
        assert_eq!(kern_chars(b'a', b'n', 6), 5);
        assert_eq!(kern_chars(b'u', b'l', 6), 5);
        assert_eq!(kern_chars(b'a', b'x', 6), 6);
        assert_eq!(kern_chars(b'n', b'a', 6), 6);
        for second in [b'n', b't', b'r', b'i', b'l'] {
            assert_eq!(kern_chars(b'u', second, 4), 3);
        }
    }

    #[test]
    fn frame_records_parse() {
        let data = [5, 8, 0x34, 0x12, 1, 2, 7, 9, 0, 0, 0, 0];
        let font = FontTable::from_frame_bytes(&data).unwrap();
        assert_eq!(font.len(), 2);
        let f = font.frame(0).unwrap();
        assert_eq!((f.width, f.height, f.data_offset), (5, 8, 0x1234));
        assert_eq!((f.x_offset, f.y_offset), (1, 2));
        assert_eq!(font.frame(1).unwrap().width, 7);
    }

    #[test]
    fn truncated_frame_table_rejected() {
        let err = FontTable::from_frame_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, TextError::BadFontTable(_)));
    }

    #[test]
    fn width_uses_active_shift() {
        let mut frames = vec![GlyphFrame::default(); 4];
        frames[1].width = 4; // '!' in the normal set
        frames[3].width = 9; // '!' two frames later
        let font = FontTable::new(frames);
        let mut ctx = TextRenderContext::default();
        assert_eq!(width_of(&ctx, &font, b'!').unwrap(), 4);
        ctx.char_shift = 2;
        assert_eq!(width_of(&ctx, &font, b'!').unwrap(), 9);
    }

    #[test]
    fn invisible_code_has_no_width() {
        let ctx = TextRenderContext::default();
        assert_eq!(width_of(&ctx, &BUILTIN_FONT, INVISIBLE).unwrap(), 0);
    }

    #[test]
    fn builtin_font_has_preview_set() {
        let mut ctx = TextRenderContext::default();
        let normal = width_of(&ctx, &BUILTIN_FONT, b'm').unwrap();
        let shifted = ctx.with_char_shift(PREVIEW_SHIFT, |ctx| {
            width_of(ctx, &BUILTIN_FONT, b'm').unwrap()
        });
        assert_eq!(normal, 7);
        assert_eq!(shifted, normal);
        assert_eq!(ctx.char_shift, 0);
    }

    #[test]
    fn glyph_lookup_respects_table_size() {
        assert!(BUILTIN_FONT.has_glyph(b'z', 0));
        assert!(BUILTIN_FONT.has_glyph(b'z', PREVIEW_SHIFT));
        assert!(!BUILTIN_FONT.has_glyph(b'{', PREVIEW_SHIFT));
        assert!(!BUILTIN_FONT.has_glyph(b'\n', 0));
        assert!(!BUILTIN_FONT.has_glyph(200, 0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "undefined glyph")]
    fn undefined_glyph_is_a_contract_violation() {
        let ctx = TextRenderContext::default();
        let _ = width_of(&ctx, &BUILTIN_FONT, 200);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn undefined_glyph_reports_error() {
        let ctx = TextRenderContext::default();
        let err = width_of(&ctx, &BUILTIN_FONT, 200).unwrap_err();
        assert!(matches!(err, TextError::UndefinedGlyph { code: 200, .. }));
    }
}
