//! Collaborator traits for the text engine
//!
//! The engine never touches pixels, input devices or timers directly. A
//! `GlyphSurface` blits font frames, an `InputPoller` reports the mouse/key
//! button state and a `FrameClock` waits for the next animation frame.

use std::fmt;

/// Destination for glyph frames
pub trait GlyphSurface {
    /// Draw font frame `frame` with its top-left corner at (x, y)
    /// Returns the (width, height) of the drawn frame
    fn show_frame(&mut self, x: u16, y: u16, frame: u16) -> Result<(u8, u8), RenderError>;

    /// Copy a dirty rectangle to the visible screen
    fn multi_dump(&mut self, x: u16, y: u16, width: u8, height: u8) -> Result<(), RenderError>;
}

/// Source of button state for interruptible presentation
pub trait InputPoller {
    /// Button state recorded before presentation starts (no polling)
    fn current_button(&self) -> u16;

    /// Read the button state for the frame that just elapsed (0 = nothing held)
    fn poll_button(&mut self) -> u16;
}

/// Animation frame clock
pub trait FrameClock {
    /// Block until the next frame
    fn wait_frame(&mut self) -> Result<(), RenderError>;
}

/// Backend error type
#[derive(Debug, Clone)]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Render error: {}", self.message)
    }
}

impl std::error::Error for RenderError {}

impl From<std::io::Error> for RenderError {
    fn from(error: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", error))
    }
}

impl From<RenderError> for String {
    fn from(error: RenderError) -> String {
        error.message
    }
}
