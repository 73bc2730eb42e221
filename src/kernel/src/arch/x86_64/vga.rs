//! VGA text mode driver for x86_64.
//!
//! Writes colored cells to the text buffer at 0xB8000, moves the hardware
//! cursor through the CRT controller, and echoes every drawn character to
//! COM1 so a headless session sees the same console.

use crate::arch::x86_64::serial;
use core::ptr;
use oneof_console::cp437;
use oneof_console::display::{BACKSPACE, HEIGHT, WIDTH};
use oneof_hal::CellDisplay;
use x86_64::instructions::port::{Port, PortWriteOnly};

/// VGA text buffer memory-mapped I/O address.
const VGA_BUFFER_ADDR: usize = 0xB8000;

/// CRT controller index register.
const CRTC_INDEX_PORT: u16 = 0x3D4;

/// CRT controller data register.
const CRTC_DATA_PORT: u16 = 0x3D5;

/// CRTC registers holding the cursor location.
const CURSOR_LOCATION_HIGH: u8 = 0x0E;
const CURSOR_LOCATION_LOW: u8 = 0x0F;

/// ANSI sequence that clears a serial terminal and homes its cursor.
const ANSI_CLEAR: &[u8] = b"\x1b[2J\x1b[H";

/// A single character cell in the VGA buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
struct ScreenChar {
    ascii_character: u8,
    color_code: u8,
}

/// The VGA text buffer layout.
#[repr(transparent)]
struct Buffer {
    chars: [[ScreenChar; WIDTH]; HEIGHT],
}

/// The VGA text buffer as a [`CellDisplay`].
pub struct VgaText {
    /// Pointer to the VGA buffer.
    ///
    /// SAFETY: This pointer is valid for the lifetime of the kernel.
    /// The VGA buffer at 0xB8000 is always mapped in x86 real/protected mode.
    buffer: *mut Buffer,
    crtc_index: PortWriteOnly<u8>,
    crtc_data: Port<u8>,
    mirror: bool,
}

// SAFETY: VgaText only accesses the VGA buffer through volatile operations.
// The buffer is memory-mapped hardware that exists for the kernel's lifetime,
// and the console that owns the VgaText is the only writer.
unsafe impl Send for VgaText {}

impl VgaText {
    /// Creates a handle to the text buffer with serial mirroring enabled.
    ///
    /// # Safety
    ///
    /// Only one `VgaText` may be live at a time, except on the panic path
    /// where the previous owner never runs again.
    pub unsafe fn new() -> Self {
        VgaText {
            // SAFETY: VGA_BUFFER_ADDR (0xB8000) is the standard VGA text buffer
            // address on x86 systems. This memory is always present and mapped
            // when running on x86 hardware or in QEMU.
            buffer: VGA_BUFFER_ADDR as *mut Buffer,
            crtc_index: PortWriteOnly::new(CRTC_INDEX_PORT),
            crtc_data: Port::new(CRTC_DATA_PORT),
            mirror: true,
        }
    }

    /// Stops echoing to COM1.
    pub fn without_mirror(mut self) -> Self {
        self.mirror = false;
        self
    }

    fn write_crtc(&mut self, register: u8, value: u8) {
        // SAFETY: 0x3D4/0x3D5 are the color-mode CRTC ports; writing the
        // cursor location registers has no effect beyond moving the cursor.
        unsafe {
            self.crtc_index.write(register);
            self.crtc_data.write(value);
        }
    }
}

impl CellDisplay for VgaText {
    fn put_cell(&mut self, row: usize, col: usize, byte: u8, attr: u8) {
        if row >= HEIGHT || col >= WIDTH {
            return;
        }
        // SAFETY: row and col were bounds checked above. The buffer pointer
        // was validated at construction time. Using volatile write because the
        // VGA buffer is memory-mapped I/O that may be read by hardware at any time.
        unsafe {
            ptr::write_volatile(
                &mut (*self.buffer).chars[row][col],
                ScreenChar {
                    ascii_character: byte,
                    color_code: attr,
                },
            );
        }
    }

    fn move_cursor(&mut self, row: usize, col: usize) {
        let position = (row * WIDTH + col).min(WIDTH * HEIGHT - 1) as u16;
        let [low, high] = position.to_le_bytes();
        self.write_crtc(CURSOR_LOCATION_LOW, low);
        self.write_crtc(CURSOR_LOCATION_HIGH, high);
    }

    fn mirror_byte(&mut self, byte: u8) {
        if !self.mirror {
            return;
        }
        match byte {
            b'\n' => serial::write_bytes(b"\r\n"),
            BACKSPACE => serial::write_bytes(&[BACKSPACE]),
            _ => {
                if let Some(c) = cp437::decode(byte) {
                    let mut utf8 = [0; 4];
                    serial::write_bytes(c.encode_utf8(&mut utf8).as_bytes());
                }
            }
        }
    }

    fn mirror_clear(&mut self) {
        if self.mirror {
            serial::write_bytes(ANSI_CLEAR);
        }
    }
}
