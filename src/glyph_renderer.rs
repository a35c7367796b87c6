//! Single glyph drawing

use crate::charmap::INVISIBLE;
use crate::context::TextRenderContext;
use crate::error::TextError;
use crate::font::{frame_index, kern_chars};
use crate::surface_trait::GlyphSurface;
use log::trace;

/// Vertical correction for glyph sets imported by localized releases
pub const FOREIGN_Y_ADJUST: u16 = 3;

/// Size of a drawn glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphBox {
    pub width: u8,
    pub height: u8,
}

/// Draw `code` at (*x, y) and advance *x past it
///
/// `next` is the byte that follows in the text; it only matters when kerning
/// is enabled. Code 255 draws nothing and leaves the cursor alone.
pub fn draw_glyph<S: GlyphSurface + ?Sized>(
    ctx: &TextRenderContext,
    surface: &mut S,
    x: &mut u16,
    y: u16,
    code: u8,
    next: u8,
) -> Result<GlyphBox, TextError> {
    if code == INVISIBLE {
        return Ok(GlyphBox::default());
    }
    let y = if ctx.foreign_release {
        y.saturating_sub(FOREIGN_Y_ADJUST)
    } else {
        y
    };
    let frame = frame_index(code, ctx.char_shift);
    let (width, height) = surface.show_frame(*x, y, frame)?;
    trace!("draw_glyph {:#04x} frame {} at ({}, {}) -> {}x{}", code, frame, *x, y, width, height);

    let advance = if ctx.kerning {
        kern_chars(code, next, width)
    } else {
        width
    };
    *x = x.wrapping_add(advance as u16);
    Ok(GlyphBox { width, height })
}

/// Draw a glyph and copy its rectangle to the screen straight away
pub fn print_both<S: GlyphSurface + ?Sized>(
    ctx: &TextRenderContext,
    surface: &mut S,
    x: &mut u16,
    y: u16,
    code: u8,
    next: u8,
) -> Result<GlyphBox, TextError> {
    let start_x = *x;
    let glyph = draw_glyph(ctx, surface, x, y, code, next)?;
    surface.multi_dump(start_x, y, glyph.width, glyph.height)?;
    Ok(glyph)
}
