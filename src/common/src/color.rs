//! VGA text-mode colors.

/// VGA color codes.
///
/// Standard 16-color VGA palette for text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Color {
    /// Black color.
    Black = 0,
    /// Blue color.
    Blue = 1,
    /// Green color.
    Green = 2,
    /// Cyan color.
    Cyan = 3,
    /// Red color.
    Red = 4,
    /// Magenta color.
    Magenta = 5,
    /// Brown color.
    Brown = 6,
    /// Light gray color.
    LightGray = 7,
    /// Dark gray color.
    DarkGray = 8,
    /// Light blue color.
    LightBlue = 9,
    /// Light green color.
    LightGreen = 10,
    /// Light cyan color.
    LightCyan = 11,
    /// Light red color.
    LightRed = 12,
    /// Pink color.
    Pink = 13,
    /// Yellow color.
    Yellow = 14,
    /// White color.
    White = 15,
}

/// Combined foreground and background color, as stored in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    /// Light gray on black, used for blank cells.
    pub const DEFAULT: ColorCode = ColorCode::on_black(Color::LightGray);

    /// Creates a new color code from foreground and background colors.
    pub const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }

    /// Creates a color code with a black background.
    pub const fn on_black(foreground: Color) -> ColorCode {
        ColorCode::new(foreground, Color::Black)
    }

    /// Wraps a raw attribute byte.
    pub const fn from_raw(attr: u8) -> ColorCode {
        ColorCode(attr)
    }

    /// Returns the raw attribute byte.
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl Default for ColorCode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_packs_background_in_high_nibble() {
        assert_eq!(ColorCode::new(Color::Yellow, Color::Blue).raw(), 0x1E);
        assert_eq!(ColorCode::on_black(Color::White).raw(), 0x0F);
    }

    #[test]
    fn default_is_light_gray_on_black() {
        assert_eq!(ColorCode::default().raw(), 0x07);
        assert_eq!(ColorCode::from_raw(0x07), ColorCode::DEFAULT);
    }
}
