//! x86_64 architecture support.
//!
//! Provides VGA text mode output, serial port communication, the PS/2
//! keyboard controller, PCI enumeration and exception handling.

pub mod gdt;
pub mod interrupts;
pub mod pci;
pub mod ps2;
pub mod serial;
pub mod vga;

pub use serial::SERIAL;

/// Halts the CPU until the next interrupt.
///
/// Hardware interrupts stay masked in this kernel, so this only returns on
/// NMI or an exception. Use it for terminal states, not for idle polling.
#[inline]
pub fn hlt() {
    x86_64::instructions::hlt();
}

/// Halts the CPU in an infinite loop.
///
/// Used after unrecoverable errors (panics).
pub fn halt_loop() -> ! {
    loop {
        hlt();
    }
}
