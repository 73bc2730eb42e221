//! Serial port driver for x86_64.
//!
//! COM1 (0x3F8) carries the `log` output, mirrors everything drawn on the
//! VGA console, and is polled as a second keyboard.

use core::fmt::{self, Write};
use oneof_hal::ByteSource;
use spin::Mutex;
use uart_16550::SerialPort;
use x86_64::instructions::port::PortReadOnly;

/// COM1 I/O port address.
const COM1_PORT: u16 = 0x3F8;

/// Line status register.
const LINE_STATUS_PORT: u16 = COM1_PORT + 5;

/// Line status bit: a received byte is waiting.
const LSR_DATA_READY: u8 = 1 << 0;

/// Global serial port instance, lazily initialized.
///
/// Uses a spinlock for safe access from the console, the logger and
/// exception handlers.
pub static SERIAL: spin::Once<Mutex<SerialPort>> = spin::Once::new();

/// Initializes the global serial port.
///
/// This function is idempotent - calling it multiple times has no effect
/// after the first successful initialization.
pub fn init() {
    get_serial();
}

/// Returns the serial port, initializing it on first use.
fn get_serial() -> &'static Mutex<SerialPort> {
    SERIAL.call_once(|| {
        // SAFETY: COM1_PORT (0x3F8) is a well-known x86 serial port address.
        // We're running in kernel mode with full I/O port access.
        // The uart_16550 crate handles the port initialization sequence correctly.
        let mut serial = unsafe { SerialPort::new(COM1_PORT) };
        serial.init();
        Mutex::new(serial)
    })
}

/// Prints to the serial port without a newline.
#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => {
        $crate::arch::x86_64::serial::_print(format_args!($($arg)*))
    };
}

/// Prints to the serial port with a newline.
#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($($arg:tt)*) => ($crate::serial_print!("{}\n", format_args!($($arg)*)))
}

/// Internal print function used by macros.
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    let serial = get_serial();
    serial.lock().write_fmt(args).expect("serial write failed");
}

/// Sends raw bytes under a single lock acquisition.
///
/// Backspace and DEL are expanded by the UART driver into an erase sequence.
pub fn write_bytes(bytes: &[u8]) {
    let mut port = get_serial().lock();
    for &byte in bytes {
        port.send(byte);
    }
}

/// Releases the serial lock from a context that can never return to its
/// holder.
///
/// # Safety
///
/// Only call this from the panic path, after which the interrupted code
/// never runs again.
pub unsafe fn force_unlock() {
    if let Some(serial) = SERIAL.get() {
        // SAFETY: Guaranteed by the caller.
        unsafe { serial.force_unlock() };
    }
}

/// COM1 receive side, polled as a keyboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialInput;

impl ByteSource for SerialInput {
    fn is_ready(&mut self) -> bool {
        let _port = get_serial().lock();
        let mut status: PortReadOnly<u8> = PortReadOnly::new(LINE_STATUS_PORT);
        // SAFETY: Reading the line status register has no side effects, and
        // the lock keeps other users of COM1 out while we look.
        let lsr = unsafe { status.read() };
        lsr & LSR_DATA_READY != 0
    }

    fn read_byte(&mut self) -> u8 {
        get_serial().lock().receive()
    }
}
