//! Console color scheme.

use oneof_common::{Color, ColorCode};

/// Headings and frames.
pub const HEADING: ColorCode = ColorCode::on_black(Color::White);
/// Body text and echoed input.
pub const TEXT: ColorCode = ColorCode::DEFAULT;
/// Hints and the layout name in the prompt.
pub const ACCENT: ColorCode = ColorCode::on_black(Color::Yellow);
/// The highlighted menu entry.
pub const SELECTED: ColorCode = ColorCode::on_black(Color::LightGreen);
/// Error messages.
pub const ERROR: ColorCode = ColorCode::on_black(Color::LightRed);
