//! PS/2 controller (8042) register layout.

use bitflags::bitflags;

/// Data port (read: scancodes and replies, write: device commands).
pub const DATA_PORT: u16 = 0x60;

/// Status register (read) and command register (write).
pub const STATUS_PORT: u16 = 0x64;

/// Controller commands written to [`STATUS_PORT`].
pub mod command {
    /// Enable the first PS/2 port (the keyboard).
    pub const ENABLE_FIRST_PORT: u8 = 0xAE;
}

/// Keyboard commands written to [`DATA_PORT`] and their replies.
pub mod device {
    /// Ask the keyboard to start sending scancodes.
    pub const ENABLE_SCANNING: u8 = 0xF4;
    /// Acknowledgment byte.
    pub const ACK: u8 = 0xFA;
}

bitflags! {
    /// Bits of the controller status register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// A byte is waiting in the output buffer.
        const OUTPUT_FULL   = 1 << 0;
        /// The controller has not consumed the last byte written to it.
        const INPUT_FULL    = 1 << 1;
        /// Set by firmware after a successful self test.
        const SYSTEM        = 1 << 2;
        /// Last write went to the command register rather than the data port.
        const COMMAND       = 1 << 3;
        /// The output byte came from the second (mouse) port.
        const AUX_DATA      = 1 << 5;
        /// Timeout talking to the device.
        const TIMEOUT_ERROR = 1 << 6;
        /// Parity error on the last byte.
        const PARITY_ERROR  = 1 << 7;
    }
}

impl Status {
    /// Decodes a raw status byte, keeping unknown bits.
    pub const fn from_raw(raw: u8) -> Self {
        Self::from_bits_retain(raw)
    }

    /// Returns `true` if a byte can be read from the data port.
    pub fn can_read(self) -> bool {
        self.contains(Status::OUTPUT_FULL)
    }

    /// Returns `true` if the controller accepts another write.
    pub fn can_write(self) -> bool {
        !self.contains(Status::INPUT_FULL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bits_decode() {
        let status = Status::from_raw(0x1D);
        assert!(status.can_read());
        assert!(status.can_write());
        assert!(status.contains(Status::SYSTEM));

        let busy = Status::from_raw(0x02);
        assert!(!busy.can_read());
        assert!(!busy.can_write());
    }
}
