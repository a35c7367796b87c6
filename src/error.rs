//! Error type for text measurement and font setup

use std::fmt;

use crate::surface_trait::RenderError;

/// Errors raised by the text engine itself (as opposed to the backend)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// A character code resolved to a frame the active font does not define.
    /// Callers are expected to filter codes through the character map first.
    UndefinedGlyph { code: u8, frame: u16 },
    /// Font frame table data was not a whole number of 6-byte records
    BadFontTable(String),
    /// Configuration could not be parsed
    Config(String),
    /// The rendering backend failed
    Render(String),
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextError::UndefinedGlyph { code, frame } => {
                write!(f, "Undefined glyph: code {:#04x} maps to frame {}", code, frame)
            }
            TextError::BadFontTable(msg) => write!(f, "Bad font table: {}", msg),
            TextError::Config(msg) => write!(f, "Config error: {}", msg),
            TextError::Render(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for TextError {}

impl From<RenderError> for TextError {
    fn from(error: RenderError) -> Self {
        TextError::Render(error.message)
    }
}

impl From<toml::de::Error> for TextError {
    fn from(error: toml::de::Error) -> Self {
        TextError::Config(error.to_string())
    }
}

impl From<TextError> for String {
    fn from(error: TextError) -> String {
        error.to_string()
    }
}
