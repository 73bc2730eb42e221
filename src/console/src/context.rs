//! Console state shared by the shell, its commands and the layout menu.

use crate::display::DisplaySurface;
use crate::input::{InputPoller, RawInput};
use crate::keyboard::{Key, ScancodeTranslator};
use crate::layout::Layout;
use oneof_common::ColorCode;
use oneof_hal::{ByteSource, CellDisplay};

/// Everything the console needs, owned in one place.
///
/// There is a single control path through the console, so the context is
/// passed by `&mut` instead of living in globals behind locks.
pub struct ConsoleContext<D, K, M> {
    screen: DisplaySurface<D>,
    input: InputPoller<K, M>,
    translator: ScancodeTranslator,
}

impl<D, K, M> ConsoleContext<D, K, M>
where
    D: CellDisplay,
    K: ByteSource,
    M: ByteSource,
{
    /// Assembles a console from its devices.
    pub fn new(display: D, keyboard: K, mirror: Option<M>, layout: Layout) -> Self {
        Self {
            screen: DisplaySurface::new(display),
            input: InputPoller::new(keyboard, mirror),
            translator: ScancodeTranslator::new(layout),
        }
    }

    /// The display surface.
    pub fn screen(&self) -> &DisplaySurface<D> {
        &self.screen
    }

    /// The display surface, for writing.
    pub fn screen_mut(&mut self) -> &mut DisplaySurface<D> {
        &mut self.screen
    }

    /// Writes `s` to the screen in `color`.
    pub fn print(&mut self, s: &str, color: ColorCode) {
        self.screen.write_string(s, color);
    }

    /// The input poller.
    pub fn input_mut(&mut self) -> &mut InputPoller<K, M> {
        &mut self.input
    }

    /// The active keyboard layout.
    pub fn layout(&self) -> Layout {
        self.translator.layout()
    }

    /// Makes `layout` active for all following key presses.
    pub fn set_layout(&mut self, layout: Layout) {
        if layout != self.translator.layout() {
            log::info!("keyboard layout set to {}", layout.name());
        }
        self.translator.set_layout(layout);
    }

    /// Polls the input devices once and decodes what arrived.
    ///
    /// Returns `None` when nothing is ready or the byte did not complete a
    /// key press (modifiers, releases, unmapped keys).
    pub fn poll_key(&mut self) -> Option<Key> {
        match self.input.poll()? {
            RawInput::Scancode(byte) => {
                let key = self.translator.translate(byte);
                if key.is_none() {
                    log::trace!("scancode {:#04x} produced no key", byte);
                }
                key
            }
            RawInput::Decoded(byte) => Some(Key::from_byte(byte)),
        }
    }

    /// Polls until a key arrives, idling the CPU between polls.
    pub fn wait_key(&mut self) -> Key {
        loop {
            if let Some(key) = self.poll_key() {
                return key;
            }
            idle();
        }
    }
}

/// Low-cost idle hint issued when no input is pending.
///
/// Input is polled with interrupts masked, so `hlt` would never wake up;
/// the spin-loop hint (`pause` on x86) is used instead.
#[inline]
pub fn idle() {
    core::hint::spin_loop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, Script};

    #[test]
    fn scancodes_are_translated_with_active_layout() {
        let mut ctx = context(&[0x15, 0x15]);
        assert_eq!(ctx.poll_key(), Some(Key::Char(b'y')));
        ctx.set_layout(Layout::De);
        assert_eq!(ctx.poll_key(), Some(Key::Char(b'z')));
        assert_eq!(ctx.poll_key(), None);
    }

    #[test]
    fn mirror_bytes_bypass_translation() {
        let mut ctx = crate::ConsoleContext::new(
            crate::testing::RecordingDisplay::default(),
            Script::new(&[0xAA]),
            Some(Script::new(b"z\r")),
            Layout::De,
        );
        // The release is consumed without producing a key.
        assert_eq!(ctx.poll_key(), None);
        assert_eq!(ctx.poll_key(), Some(Key::Char(b'z')));
        assert_eq!(ctx.poll_key(), Some(Key::Enter));
    }

    #[test]
    fn wait_key_skips_silent_bytes() {
        let mut ctx = context(&[0x2A, 0x1E]);
        assert_eq!(ctx.wait_key(), Key::Char(b'A'));
    }
}
