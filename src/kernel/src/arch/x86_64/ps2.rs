//! Polled PS/2 keyboard controller (8042).
//!
//! The controller is never programmed for interrupts; the console polls the
//! status register and pulls scancodes from the data port.

use oneof_common::ps2::{self, command, device, Status};
use oneof_common::wait::{settle, spin_until};
use oneof_common::DeviceError;
use oneof_hal::ByteSource;
use x86_64::instructions::port::{Port, PortReadOnly, PortWriteOnly};

/// Polls allowed for the controller to accept a command.
const WRITE_WAIT_LIMIT: u32 = 100_000;

/// Polls allowed for the keyboard to answer a command.
const REPLY_WAIT_LIMIT: u32 = 1_000_000;

/// Spin iterations before the controller is first touched.
const SETTLE_ITERATIONS: u32 = 100_000;

/// Upper bound on stale bytes discarded after enabling the port.
const DRAIN_LIMIT: usize = 32;

/// A status byte of all ones means nothing answers on the bus.
const FLOATING_BUS: u8 = 0xFF;

/// The 8042 controller at ports 0x60/0x64.
pub struct Ps2Controller {
    data: Port<u8>,
    status: PortReadOnly<u8>,
    command: PortWriteOnly<u8>,
}

impl Ps2Controller {
    /// Creates a handle to the controller.
    ///
    /// # Safety
    ///
    /// The caller must ensure this is the only handle in use, since reading
    /// the data port consumes bytes.
    pub unsafe fn new() -> Self {
        Self {
            data: Port::new(ps2::DATA_PORT),
            status: PortReadOnly::new(ps2::STATUS_PORT),
            command: PortWriteOnly::new(ps2::STATUS_PORT),
        }
    }

    /// Reads the status register.
    pub fn status(&mut self) -> Status {
        // SAFETY: Reading the 8042 status register has no side effects.
        Status::from_raw(unsafe { self.status.read() })
    }

    /// Enables the first PS/2 port and discards stale output.
    ///
    /// Returns the number of bytes drained.
    pub fn enable(&mut self) -> Result<usize, DeviceError> {
        settle(SETTLE_ITERATIONS);

        if self.status().bits() == FLOATING_BUS {
            return Err(DeviceError::NotPresent);
        }

        self.write_command(command::ENABLE_FIRST_PORT)?;

        let mut drained = 0;
        while drained < DRAIN_LIMIT && self.status().can_read() {
            let stale = self.read_data();
            log::trace!("drained stale byte {:#04x}", stale);
            drained += 1;
        }
        Ok(drained)
    }

    /// Asks the keyboard to start scanning and checks the acknowledgment.
    pub fn enable_scanning(&mut self) -> Result<(), DeviceError> {
        self.write_data(device::ENABLE_SCANNING)?;
        spin_until(REPLY_WAIT_LIMIT, || self.status().can_read())?;
        match self.read_data() {
            device::ACK => Ok(()),
            other => Err(DeviceError::Unacknowledged(other)),
        }
    }

    fn write_command(&mut self, byte: u8) -> Result<(), DeviceError> {
        spin_until(WRITE_WAIT_LIMIT, || self.status().can_write())?;
        // SAFETY: The controller input buffer is empty, so the command is
        // accepted rather than lost.
        unsafe { self.command.write(byte) };
        Ok(())
    }

    fn write_data(&mut self, byte: u8) -> Result<(), DeviceError> {
        spin_until(WRITE_WAIT_LIMIT, || self.status().can_write())?;
        // SAFETY: As in write_command; the byte is forwarded to the keyboard.
        unsafe { self.data.write(byte) };
        Ok(())
    }

    fn read_data(&mut self) -> u8 {
        // SAFETY: Reading the data port only pops the controller's output
        // buffer, which this handle owns exclusively.
        unsafe { self.data.read() }
    }
}

impl ByteSource for Ps2Controller {
    fn is_ready(&mut self) -> bool {
        self.status().can_read()
    }

    fn read_byte(&mut self) -> u8 {
        self.read_data()
    }
}
