//! Logging wrapper for glyph surfaces
//!
//! Logs every backend operation, numbered, to help track down layout
//! differences against reference screenshots.

use crate::surface_trait::{GlyphSurface, RenderError};
use log::info;

pub struct LoggingSurface<S: GlyphSurface> {
    inner: S,
    op_count: usize,
}

impl<S: GlyphSurface> LoggingSurface<S> {
    pub fn new(inner: S) -> Self {
        info!("=== GLYPH LOGGING STARTED ===");
        Self { inner, op_count: 0 }
    }

    fn log_op(&mut self, op: &str) {
        self.op_count += 1;
        info!("[OP {:04}] {}", self.op_count, op);
    }

    pub fn op_count(&self) -> usize {
        self.op_count
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: GlyphSurface> GlyphSurface for LoggingSurface<S> {
    fn show_frame(&mut self, x: u16, y: u16, frame: u16) -> Result<(u8, u8), RenderError> {
        self.log_op(&format!("show_frame({}, {}, {})", x, y, frame));
        self.inner.show_frame(x, y, frame)
    }

    fn multi_dump(&mut self, x: u16, y: u16, width: u8, height: u8) -> Result<(), RenderError> {
        self.log_op(&format!("multi_dump({}, {}, {}, {})", x, y, width, height));
        self.inner.multi_dump(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BUILTIN_FONT;
    use crate::surface_headless::HeadlessSurface;
    use test_log::test;

    #[test]
    fn forwards_and_counts() {
        let mut surface = LoggingSurface::new(HeadlessSurface::new(&BUILTIN_FONT));
        surface.show_frame(1, 2, 3).unwrap();
        surface.multi_dump(1, 2, 5, 8).unwrap();
        assert_eq!(surface.op_count(), 2);
        assert_eq!(surface.inner().ops().len(), 2);
    }
}
