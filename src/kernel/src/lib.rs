//! 1of90OS Kernel
//!
//! A minimal bootable x86_64 kernel: a VGA text console driven by a polled
//! PS/2 keyboard, with a line shell on top.
//!
//! # Architecture
//!
//! The kernel is structured into the following modules:
//! - `arch`: Platform-specific code (VGA, serial, PS/2, PCI, exceptions)
//! - `boot`: Boot banner and status lines
//! - `logger`: `log` backend writing to COM1
//! - `testutil`: QEMU test harness support
//!
//! Console behavior itself lives in the `oneof-console` crate; this crate
//! only provides the hardware behind its traits.
//!
//! # Safety
//!
//! This is a `#![no_std]` kernel. All unsafe code is documented with safety
//! invariants explaining why the usage is correct.

#![no_std]
#![feature(abi_x86_interrupt)]
#![warn(missing_docs)]

pub mod arch;
pub mod boot;
pub mod logger;
pub mod testutil;

use oneof_console::ConsoleContext;

/// The console as assembled on real hardware.
#[cfg(target_arch = "x86_64")]
pub type Console = ConsoleContext<arch::vga::VgaText, arch::ps2::Ps2Controller, arch::serial::SerialInput>;

/// Initializes core kernel subsystems.
///
/// Called early in the boot process, before anything is drawn, so that
/// faults during the rest of boot are caught and reported over serial.
pub fn init() {
    #[cfg(target_arch = "x86_64")]
    {
        arch::x86_64::serial::init();
        logger::init();
        arch::x86_64::gdt::init();
        arch::x86_64::interrupts::init_idt();
    }
}
