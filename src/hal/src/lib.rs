//! 1of90OS Hardware Abstraction Layer (HAL) traits.
//!
//! This crate defines the capabilities the console core needs from the
//! machine: a source of raw input bytes and a cell-addressed display.

#![no_std]

/// A polled source of raw input bytes, such as a keyboard controller.
pub trait ByteSource {
    /// Returns `true` if a byte is waiting to be read.
    fn is_ready(&mut self) -> bool;

    /// Consumes one byte from the device.
    ///
    /// Only meaningful after [`ByteSource::is_ready`] returned `true`.
    fn read_byte(&mut self) -> u8;

    /// Reads a byte if one is available, without blocking.
    fn try_read(&mut self) -> Option<u8> {
        if self.is_ready() {
            Some(self.read_byte())
        } else {
            None
        }
    }
}

/// A source that never has data. Used where an optional channel is absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct Disconnected;

impl ByteSource for Disconnected {
    fn is_ready(&mut self) -> bool {
        false
    }

    fn read_byte(&mut self) -> u8 {
        0
    }
}

/// A display addressed by character cells.
pub trait CellDisplay {
    /// Stores `byte` with attribute `attr` at the given cell.
    fn put_cell(&mut self, row: usize, col: usize, byte: u8, attr: u8);

    /// Moves the visible cursor.
    fn move_cursor(&mut self, _row: usize, _col: usize) {}

    /// Receives every character written to the console, in order.
    ///
    /// Secondary channels (a serial terminal, for instance) use this to
    /// mirror the console as a character stream.
    fn mirror_byte(&mut self, _byte: u8) {}

    /// Signals that the whole console was cleared.
    fn mirror_clear(&mut self) {}
}
