//! Headless glyph surface for testing and non-interactive output
//!
//! Records every blit and dirty-rectangle flush instead of drawing pixels.
//! Frame sizes come from the font table, like the real blitter reads them
//! from the frame records.

use crate::font::{FontTable, FIRST_CHAR, PREVIEW_SHIFT};
use crate::surface_trait::{GlyphSurface, RenderError};
use log::debug;
use std::collections::BTreeMap;

/// A recorded glyph blit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blit {
    pub x: u16,
    pub y: u16,
    pub frame: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceOp {
    Blit(Blit),
    Dump { x: u16, y: u16, width: u8, height: u8 },
}

#[derive(Debug)]
pub struct HeadlessSurface {
    font: FontTable,
    preview_shift: u16,
    ops: Vec<SurfaceOp>,
}

impl HeadlessSurface {
    pub fn new(font: &FontTable) -> Self {
        Self::with_preview_shift(font, PREVIEW_SHIFT)
    }

    /// `preview_shift` must match the context's, so `text_rows` can tell
    /// look-ahead glyphs from normal ones
    pub fn with_preview_shift(font: &FontTable, preview_shift: u16) -> Self {
        HeadlessSurface {
            font: font.clone(),
            preview_shift,
            ops: Vec::new(),
        }
    }

    /// Everything drawn so far, in order
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn blits(&self) -> Vec<Blit> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Blit(b) => Some(*b),
                SurfaceOp::Dump { .. } => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Rebuild the text of each row from normal-set blits, keyed by y
    /// Highlighted look-ahead glyphs are left out.
    pub fn text_rows(&self) -> Vec<(u16, String)> {
        let mut rows: BTreeMap<u16, BTreeMap<u16, char>> = BTreeMap::new();
        for blit in self.blits() {
            if blit.frame >= self.preview_shift {
                continue;
            }
            let c = (blit.frame as u8).wrapping_add(FIRST_CHAR) as char;
            rows.entry(blit.y).or_default().insert(blit.x, c);
        }
        rows.into_iter()
            .map(|(y, glyphs)| (y, glyphs.into_values().collect()))
            .collect()
    }
}

impl GlyphSurface for HeadlessSurface {
    fn show_frame(&mut self, x: u16, y: u16, frame: u16) -> Result<(u8, u8), RenderError> {
        let glyph = self
            .font
            .frame(frame)
            .ok_or_else(|| RenderError::new(format!("frame {} out of range", frame)))?;
        self.ops.push(SurfaceOp::Blit(Blit { x, y, frame }));
        Ok((glyph.width, glyph.height))
    }

    fn multi_dump(&mut self, x: u16, y: u16, width: u8, height: u8) -> Result<(), RenderError> {
        debug!("Headless: multi_dump({}, {}, {}x{})", x, y, width, height);
        self.ops.push(SurfaceOp::Dump { x, y, width, height });
        Ok(())
    }
}
