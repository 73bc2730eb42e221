//! Scancode translation.
//!
//! Turns raw set-1 scancodes into [`Key`]s using the active [`Layout`],
//! tracking the shift keys and the `0xE0` extended-key prefix.

use crate::display::BACKSPACE;
use crate::layout::Layout;

/// Prefix byte announcing an extended key.
pub const EXTENDED_PREFIX: u8 = 0xE0;

/// Bit set in the scancode of a key release.
const RELEASE_BIT: u8 = 0x80;

const LEFT_SHIFT: u8 = 0x2A;
const RIGHT_SHIFT: u8 = 0x36;

/// Control values reserved for the arrow keys, outside the printable range.
pub mod control {
    /// Arrow up.
    pub const UP: u8 = 0x18;
    /// Arrow down.
    pub const DOWN: u8 = 0x19;
    /// Arrow left.
    pub const LEFT: u8 = 0x1A;
    /// Arrow right.
    pub const RIGHT: u8 = 0x1B;
}

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A character in code page 437.
    Char(u8),
    /// Enter.
    Enter,
    /// Backspace.
    Backspace,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
}

impl Key {
    /// Interprets an already-decoded byte, as received from a serial
    /// terminal or stored in a layout table.
    pub fn from_byte(byte: u8) -> Key {
        match byte {
            b'\n' | b'\r' => Key::Enter,
            BACKSPACE | 0x7F => Key::Backspace,
            control::UP => Key::Up,
            control::DOWN => Key::Down,
            control::LEFT => Key::Left,
            control::RIGHT => Key::Right,
            other => Key::Char(other),
        }
    }
}

/// Modifier and prefix state observed from the scancode stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Either shift key is held.
    pub shift_pressed: bool,
    /// The previous byte was [`EXTENDED_PREFIX`].
    pub extended_prefix_pending: bool,
}

/// Set-1 scancode decoder with switchable layout.
#[derive(Debug, Clone, Default)]
pub struct ScancodeTranslator {
    state: InputState,
    layout: Layout,
}

impl ScancodeTranslator {
    /// Creates a translator with no modifiers held.
    pub fn new(layout: Layout) -> Self {
        Self {
            state: InputState::default(),
            layout,
        }
    }

    /// The active layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Replaces the table used for future translations. Modifier state is kept.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    /// Current modifier and prefix state.
    pub fn state(&self) -> InputState {
        self.state
    }

    /// Feeds one raw byte; returns a key if it completes a key press.
    pub fn translate(&mut self, byte: u8) -> Option<Key> {
        if byte == EXTENDED_PREFIX {
            self.state.extended_prefix_pending = true;
            return None;
        }

        let code = byte & !RELEASE_BIT;
        let released = byte & RELEASE_BIT != 0;

        if code == LEFT_SHIFT || code == RIGHT_SHIFT {
            self.state.shift_pressed = !released;
            return None;
        }

        if self.state.extended_prefix_pending && !released {
            self.state.extended_prefix_pending = false;
            return match code {
                0x48 => Some(Key::Up),
                0x50 => Some(Key::Down),
                0x4B => Some(Key::Left),
                0x4D => Some(Key::Right),
                _ => None,
            };
        }
        self.state.extended_prefix_pending = false;

        if released {
            return None;
        }

        let base = self.layout.lookup(code)?;
        let byte = if self.state.shift_pressed && base.is_ascii_lowercase() {
            base.to_ascii_uppercase()
        } else {
            base
        };
        Some(Key::from_byte(byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(translator: &mut ScancodeTranslator, bytes: &[u8]) -> Vec<Key> {
        bytes.iter().filter_map(|&b| translator.translate(b)).collect()
    }

    #[test]
    fn letters_and_digits() {
        let mut t = ScancodeTranslator::new(Layout::Us);
        assert_eq!(
            keys(&mut t, &[0x23, 0xA3, 0x12, 0x92, 0x02, 0x82]),
            vec![Key::Char(b'h'), Key::Char(b'e'), Key::Char(b'1')]
        );
    }

    #[test]
    fn enter_and_backspace_become_control_keys() {
        let mut t = ScancodeTranslator::new(Layout::Fr);
        assert_eq!(t.translate(0x1C), Some(Key::Enter));
        assert_eq!(t.translate(0x0E), Some(Key::Backspace));
    }

    #[test]
    fn releases_never_produce_output() {
        for layout in Layout::ALL {
            for shift in [false, true] {
                let mut t = ScancodeTranslator::new(layout);
                if shift {
                    t.translate(LEFT_SHIFT);
                }
                for byte in 0x80..=0xFFu8 {
                    // Shift releases would change the state under test.
                    if byte == LEFT_SHIFT | RELEASE_BIT || byte == RIGHT_SHIFT | RELEASE_BIT {
                        continue;
                    }
                    assert_eq!(t.translate(byte), None, "{:?} {:#x}", layout, byte);
                }
            }
        }
    }

    #[test]
    fn shift_press_release_restores_state() {
        let mut t = ScancodeTranslator::new(Layout::Us);
        assert!(!t.state().shift_pressed);
        t.translate(0x2A);
        assert!(t.state().shift_pressed);
        t.translate(0xAA);
        assert!(!t.state().shift_pressed);

        t.translate(0x36);
        t.translate(0x2A);
        t.translate(0xAA);
        assert!(!t.state().shift_pressed);
    }

    #[test]
    fn shift_only_uppercases_ascii_letters() {
        let mut t = ScancodeTranslator::new(Layout::De);
        t.translate(0x36);
        assert_eq!(t.translate(0x1E), Some(Key::Char(b'A')));
        assert_eq!(t.translate(0x02), Some(Key::Char(b'1')));
        assert_eq!(t.translate(0x27), Some(Key::Char(0x94)));
        t.translate(0xB6);
        assert_eq!(t.translate(0x1E), Some(Key::Char(b'a')));
    }

    #[test]
    fn extended_arrows() {
        let mut t = ScancodeTranslator::new(Layout::Us);
        assert_eq!(
            keys(&mut t, &[0xE0, 0x48, 0xE0, 0xC8, 0xE0, 0x50, 0xE0, 0x4B, 0xE0, 0x4D]),
            vec![Key::Up, Key::Down, Key::Left, Key::Right]
        );
    }

    #[test]
    fn prefix_is_pending_until_next_byte() {
        let mut t = ScancodeTranslator::new(Layout::Us);
        assert_eq!(t.translate(0xE0), None);
        assert!(t.state().extended_prefix_pending);
        // Unknown extended key (right control) is swallowed.
        assert_eq!(t.translate(0x1D), None);
        assert!(!t.state().extended_prefix_pending);
        assert_eq!(t.translate(0x1E), Some(Key::Char(b'a')));
    }

    #[test]
    fn extended_release_clears_prefix() {
        let mut t = ScancodeTranslator::new(Layout::Us);
        t.translate(0xE0);
        assert_eq!(t.translate(0xC8), None);
        assert!(!t.state().extended_prefix_pending);
        assert_eq!(t.translate(0x48), None);
    }

    #[test]
    fn extended_shift_still_tracks_shift() {
        let mut t = ScancodeTranslator::new(Layout::Us);
        t.translate(0xE0);
        t.translate(0x2A);
        assert!(t.state().shift_pressed);
        assert!(t.state().extended_prefix_pending);
    }

    #[test]
    fn layout_switch_changes_only_differing_keys() {
        let typed = [0x2A, 0x15, 0xAA, 0x15, 0x23, 0x2C];
        let mut us = ScancodeTranslator::new(Layout::Us);
        let mut de = ScancodeTranslator::new(Layout::Us);
        de.set_layout(Layout::De);
        assert_eq!(
            keys(&mut us, &typed),
            vec![Key::Char(b'Y'), Key::Char(b'y'), Key::Char(b'h'), Key::Char(b'z')]
        );
        assert_eq!(
            keys(&mut de, &typed),
            vec![Key::Char(b'Z'), Key::Char(b'z'), Key::Char(b'h'), Key::Char(b'y')]
        );
    }

    #[test]
    fn switching_layout_keeps_shift() {
        let mut t = ScancodeTranslator::new(Layout::Us);
        t.translate(0x2A);
        t.set_layout(Layout::De);
        assert_eq!(t.translate(0x15), Some(Key::Char(b'Z')));
    }

    #[test]
    fn serial_bytes_decode_to_keys() {
        assert_eq!(Key::from_byte(b'\r'), Key::Enter);
        assert_eq!(Key::from_byte(0x7F), Key::Backspace);
        assert_eq!(Key::from_byte(0x19), Key::Down);
        assert_eq!(Key::from_byte(b'q'), Key::Char(b'q'));
    }
}
