//! Boot logging with colored status indicators.
//!
//! Provides Linux-style boot messages with colored status brackets, drawn
//! through the console surface so they scroll and mirror like any other
//! output.

pub mod banner;

use core::fmt::{Display, Write};
use oneof_common::{Color, ColorCode};
use oneof_console::{palette, DisplaySurface};
use oneof_hal::CellDisplay;

/// Boot status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Success - `[ OK ]` in green
    Ok,
    /// Failure - `[FAIL]` in red
    Fail,
    /// Warning - `[WARN]` in yellow
    Warn,
    /// Informational - `[INFO]` in cyan
    Info,
}

impl Status {
    fn label(self) -> (&'static str, ColorCode) {
        match self {
            Status::Ok => ("[ OK ]", ColorCode::on_black(Color::LightGreen)),
            Status::Fail => ("[FAIL]", ColorCode::on_black(Color::LightRed)),
            Status::Warn => ("[WARN]", ColorCode::on_black(Color::Yellow)),
            Status::Info => ("[INFO]", ColorCode::on_black(Color::LightCyan)),
        }
    }
}

/// Log a boot stage with status.
///
/// Format: `[ OK ] Message text`
pub fn log<D: CellDisplay>(screen: &mut DisplaySurface<D>, status: Status, message: impl Display) {
    print_status(screen, status);
    // Formatting into the screen cannot fail.
    let _ = writeln!(screen.pen(palette::TEXT), " {}", message);
}

fn print_status<D: CellDisplay>(screen: &mut DisplaySurface<D>, status: Status) {
    let (text, color) = status.label();
    screen.write_string(text, color);
}
