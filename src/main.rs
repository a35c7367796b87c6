use dreamprint::config::TextConfig;
use dreamprint::line_breaker::{centered_flag, layout_line};
use dreamprint::surface_headless::HeadlessSurface;
use dreamprint::surface_logging::LoggingSurface;
use dreamprint::surface_terminal::{TerminalClock, TerminalInput, TerminalSurface};
use dreamprint::word_scanner::scan_word;
use dreamprint::{prepare_text, print_direct, print_slow, SlowOutcome};
use log::{debug, info};
use std::env;
use std::path::PathBuf;

struct Options {
    config: Option<PathBuf>,
    width: u8,
    center: bool,
    slow: bool,
    measure: bool,
    log_ops: bool,
    text: String,
}

fn usage(program: &str) {
    println!("dreamprint - bitmap text layout for legacy adventure game interpreters");
    println!();
    println!(
        "Usage: {} [--config FILE] [--width N] [--center] [--slow] [--measure] [--log-ops] TEXT",
        program
    );
    println!("Examples:");
    println!("  {} --width 200 \"You can see a door to the north.\"", program);
    println!("  {} --slow --center --width 120 \"Press any key to skip this\"", program);
    println!();
    println!("--width takes the engine's width byte; --center (or an odd width) centers");
    println!("--slow types the text out on the terminal; any key interrupts it");
    println!("--measure prints the glyph positions of every line instead");
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config: None,
        width: 200,
        center: false,
        slow: false,
        measure: false,
        log_ops: false,
        text: String::new(),
    };
    let mut words = Vec::new();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config needs a file")?;
                options.config = Some(PathBuf::from(path));
            }
            "--width" => {
                i += 1;
                let value = args.get(i).ok_or("--width needs a value")?;
                options.width = value
                    .parse()
                    .map_err(|_| format!("Invalid width: {}", value))?;
            }
            "--center" => options.center = true,
            "--slow" => options.slow = true,
            "--measure" => options.measure = true,
            "--log-ops" => options.log_ops = true,
            word => words.push(word.to_string()),
        }
        i += 1;
    }
    options.text = words.join(" ");
    Ok(options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage(args.first().map(String::as_str).unwrap_or("dreamprint"));
        return Ok(());
    }
    let options = parse_args(&args)?;

    // Load configuration and font
    let config = match &options.config {
        Some(path) => TextConfig::load(path)?,
        None => TextConfig::default(),
    };
    let mut ctx = config.context()?;
    let font = config.font_table()?;

    // Command line text is arbitrary UTF-8; keep only what the font can draw
    let text = prepare_text(&ctx, &font, &options.text);
    let max_width = options.width as u16;
    let centered = options.center || centered_flag(options.width);
    debug!("Printing {} bytes, width {}, centered {}", text.len(), max_width, centered);

    // Measure only
    if options.measure {
        let mut index = 0;
        while index < text.len() && !ctx.is_terminator(text[index]) {
            let layout = layout_line(&ctx, &font, &text, index, max_width, centered)?;
            let count = match layout.char_count {
                0 => scan_word(&ctx, &font, &text, index)?.char_count,
                n => n,
            };
            println!(
                "{:>3} chars, {:>3} px spare: {:?}",
                layout.char_count,
                layout.leftover_width,
                layout
                    .glyphs
                    .iter()
                    .map(|&(c, x)| format!("{}@{}", c as char, x))
                    .collect::<Vec<_>>()
            );
            index += count;
        }
        return Ok(());
    }

    // Paced output on a real terminal
    if options.slow && atty::is(atty::Stream::Stdout) && atty::is(atty::Stream::Stdin) {
        let mut surface = TerminalSurface::new(&font, ctx.preview_shift)?;
        let mut clock = TerminalClock::new();
        let outcome = {
            let mut input = TerminalInput::new()?;
            print_slow(&mut ctx, &font, &mut surface, &mut clock, &mut input, &text, 0, 0, max_width, centered)?
        };
        surface.finish()?;
        if outcome == SlowOutcome::Interrupted {
            info!("Text skipped by key press");
        }
        return Ok(());
    }

    // Immediate output through the headless surface
    let mut y = 0;
    let rows = if options.log_ops {
        let mut surface = LoggingSurface::new(HeadlessSurface::with_preview_shift(&font, ctx.preview_shift));
        print_direct(&ctx, &font, &mut surface, &text, 0, &mut y, max_width, centered)?;
        info!("{} surface operations", surface.op_count());
        surface.into_inner().text_rows()
    } else {
        let mut surface = HeadlessSurface::with_preview_shift(&font, ctx.preview_shift);
        print_direct(&ctx, &font, &mut surface, &text, 0, &mut y, max_width, centered)?;
        surface.text_rows()
    };
    for (row_y, line) in rows {
        println!("{:>4} | {}", row_y, line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("dreamprint").chain(list.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn center_survives_a_later_width() {
        let options = parse_args(&args(&["--center", "--width", "120", "hello"])).unwrap();
        assert!(options.center);
        assert_eq!(options.width, 120);
        let options = parse_args(&args(&["--width", "120", "--center", "hello"])).unwrap();
        assert!(options.center);
        assert_eq!(options.width, 120);
    }

    #[test]
    fn words_are_joined() {
        let options = parse_args(&args(&["--slow", "go", "north"])).unwrap();
        assert!(options.slow);
        assert!(!options.center);
        assert_eq!(options.text, "go north");
    }

    #[test]
    fn width_must_be_a_byte() {
        assert!(parse_args(&args(&["--width", "300", "x"])).is_err());
        assert!(parse_args(&args(&["--width"])).is_err());
    }
}
