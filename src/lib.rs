#![crate_name = "dreamprint"]

#[macro_use]
extern crate lazy_static;

pub mod charmap;
pub mod config;
pub mod context;
pub mod error;
pub mod font;
pub mod glyph_renderer;
pub mod line_breaker;
pub mod printer;
pub mod slow_print;
pub mod surface_headless;
pub mod surface_logging;
pub mod surface_terminal;
pub mod surface_trait;
pub mod word_scanner;


pub use context::TextRenderContext;
pub use error::TextError;
pub use font::FontTable;
pub use printer::{prepare_text, print_direct, DirectPrint};
pub use slow_print::{print_slow, SlowOutcome, SlowPrint, SlowState};

/*
Text byte stream, as stored in the game's message files

    "Can't see anything special about it.:"
     ^ codes go through the character map first
                                         ^ ':' or 0x00 ends the text

Layout of one line, for a width byte of 201 (200 px, bit 0 = centered)

    |<- offset ->|Can't see anything |<- offset ->|
    offset = ((200 & ~1) - width + 20) / 2   when the next word overflowed
    offset = ((200 & ~1) + 22 - width) / 2   when the text ended on this line
*/
