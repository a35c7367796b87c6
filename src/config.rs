//! TOML configuration for the text engine
//!
//! ```toml
//! line_spacing = 10
//! kerning = true
//! foreign_release = false
//! stop_byte = ":"
//! font = "fonts/charset1.frames"
//!
//! [[char_map]]
//! from = 129
//! to = 123
//! ```

use crate::charmap::CharMap;
use crate::context::{TextRenderContext, DEFAULT_STOP_BYTE, SLOW_LINE_STEP};
use crate::error::TextError;
use crate::font::{FontTable, BUILTIN_FONT, PREVIEW_SHIFT};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One character remapping entry
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct CharMapEntry {
    pub from: u8,
    pub to: u8,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    pub line_spacing: u16,
    pub kerning: bool,
    pub foreign_release: bool,
    /// Single-character string, e.g. ":"
    pub stop_byte: String,
    pub preview_shift: u16,
    pub slow_line_step: u16,
    /// Packed 6-byte frame records; the built-in font when absent
    pub font: Option<PathBuf>,
    pub char_map: Vec<CharMapEntry>,
}

impl Default for TextConfig {
    fn default() -> Self {
        TextConfig {
            line_spacing: 10,
            kerning: true,
            foreign_release: false,
            stop_byte: (DEFAULT_STOP_BYTE as char).to_string(),
            preview_shift: PREVIEW_SHIFT,
            slow_line_step: SLOW_LINE_STEP,
            font: None,
            char_map: Vec::new(),
        }
    }
}

impl TextConfig {
    pub fn from_toml(source: &str) -> Result<Self, TextError> {
        let config: TextConfig = toml::from_str(source)?;
        config.stop_byte()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, TextError> {
        info!("Loading text config from {}", path.display());
        let source = fs::read_to_string(path)
            .map_err(|e| TextError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&source)
    }

    fn stop_byte(&self) -> Result<u8, TextError> {
        match self.stop_byte.as_bytes() {
            [b] => Ok(*b),
            _ => Err(TextError::Config(format!(
                "stop_byte must be a single byte, got {:?}",
                self.stop_byte
            ))),
        }
    }

    /// Build the render context this configuration describes
    pub fn context(&self) -> Result<TextRenderContext, TextError> {
        let pairs: Vec<(u8, u8)> = self.char_map.iter().map(|e| (e.from, e.to)).collect();
        let ctx = TextRenderContext {
            char_shift: 0,
            kerning: self.kerning,
            foreign_release: self.foreign_release,
            line_spacing: self.line_spacing,
            stop_byte: self.stop_byte()?,
            preview_shift: self.preview_shift,
            slow_line_step: self.slow_line_step,
            char_map: CharMap::from_pairs(&pairs),
        };
        debug!("Text context: {:?}", ctx);
        Ok(ctx)
    }

    /// Load the configured font, or the built-in one
    pub fn font_table(&self) -> Result<FontTable, TextError> {
        match &self.font {
            Some(path) => {
                let data = fs::read(path)
                    .map_err(|e| TextError::BadFontTable(format!("{}: {}", path.display(), e)))?;
                let font = FontTable::from_frame_bytes(&data)?;
                info!("Loaded {} frames from {}", font.len(), path.display());
                Ok(font)
            }
            None => Ok(BUILTIN_FONT.clone()),
        }
    }
}
