//! Welcome banner and first-use hint.

use core::fmt::Write;
use oneof_console::{palette, DisplaySurface};
use oneof_hal::CellDisplay;

const VERSION_MAJOR: &str = env!("CARGO_PKG_VERSION_MAJOR");
const VERSION_MINOR: &str = env!("CARGO_PKG_VERSION_MINOR");

/// Print the welcome line shown right after the screen is cleared.
pub fn print_banner<D: CellDisplay>(screen: &mut DisplaySurface<D>) {
    let _ = writeln!(
        screen.pen(palette::HEADING),
        "Welcome to 1of90OS v{}.{}!",
        VERSION_MAJOR,
        VERSION_MINOR
    );
    screen.write_string("\n", palette::TEXT);
}

/// Print the hint that precedes the first prompt.
pub fn print_hint<D: CellDisplay>(screen: &mut DisplaySurface<D>) {
    screen.write_string(
        "\nType 'help' for commands or 'manual' for user guide.\n\n",
        palette::TEXT,
    );
}
