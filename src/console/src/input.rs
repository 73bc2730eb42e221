//! Non-blocking input polling.

use crate::keyboard::control;
use oneof_hal::ByteSource;

const ESC: u8 = 0x1B;

/// One byte taken from an input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    /// A set-1 scancode from the keyboard controller.
    Scancode(u8),
    /// An already-decoded character from the mirror channel.
    Decoded(u8),
}

/// Where the mirror decoder is inside a terminal byte sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum MirrorState {
    #[default]
    Ground,
    /// Last byte was `\r`; a following `\n` belongs to the same line end.
    AfterCr,
    /// After ESC.
    Escape,
    /// After `ESC [`, waiting for the final byte.
    Csi,
}

/// Polls the keyboard and, when it is idle, an optional mirror channel.
///
/// Serial terminals end lines with CRLF and send arrows as `ESC [ A..D`.
/// Both are folded into single decoded bytes before they reach the console.
pub struct InputPoller<K, M> {
    keyboard: K,
    mirror: Option<M>,
    state: MirrorState,
}

impl<K: ByteSource, M: ByteSource> InputPoller<K, M> {
    /// Creates a poller over `keyboard` and an optional `mirror`.
    pub fn new(keyboard: K, mirror: Option<M>) -> Self {
        Self {
            keyboard,
            mirror,
            state: MirrorState::Ground,
        }
    }

    /// Takes at most one byte without waiting.
    ///
    /// The mirror is only consulted when the keyboard has nothing ready.
    /// Mirror bytes that only continue a sequence return `None`.
    pub fn poll(&mut self) -> Option<RawInput> {
        if let Some(scancode) = self.keyboard.try_read() {
            return Some(RawInput::Scancode(scancode));
        }
        let byte = self.mirror.as_mut()?.try_read()?;
        self.decode_mirror(byte).map(RawInput::Decoded)
    }

    fn decode_mirror(&mut self, byte: u8) -> Option<u8> {
        let state = core::mem::take(&mut self.state);
        match (state, byte) {
            (MirrorState::AfterCr, b'\n') => None,
            (MirrorState::Escape, b'[') => {
                self.state = MirrorState::Csi;
                None
            }
            // Parameter and intermediate bytes, as in `ESC [ 1 ; 5 A`.
            (MirrorState::Csi, 0x20..=0x3F) => {
                self.state = MirrorState::Csi;
                None
            }
            (MirrorState::Csi, final_byte) => {
                let arrow = match final_byte {
                    b'A' => Some(control::UP),
                    b'B' => Some(control::DOWN),
                    b'C' => Some(control::RIGHT),
                    b'D' => Some(control::LEFT),
                    _ => None,
                };
                if arrow.is_none() {
                    log::trace!("ignored escape sequence ending {:#04x}", final_byte);
                }
                arrow
            }
            (_, ESC) => {
                self.state = MirrorState::Escape;
                None
            }
            (_, b'\r') => {
                self.state = MirrorState::AfterCr;
                Some(byte)
            }
            (_, other) => Some(other),
        }
    }

    /// The keyboard source.
    pub fn keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }

    /// The mirror source, if one is attached.
    pub fn mirror_mut(&mut self) -> Option<&mut M> {
        self.mirror.as_mut()
    }
}
