#![no_std]
#![no_main]
#![feature(custom_test_frameworks)]
#![test_runner(oneof_kernel::testutil::test_runner)]
#![reexport_test_harness_main = "test_main"]

use core::panic::PanicInfo;
use oneof_console::{Command, ConsoleContext, DisplaySurface, Layout, HEIGHT};
use oneof_hal::Disconnected;
use oneof_kernel::arch::{interrupts, pci, vga::VgaText};
use oneof_kernel::testutil::{exit_qemu, QemuExitCode};

#[no_mangle]
pub extern "C" fn _start() -> ! {
    oneof_kernel::init();
    test_main();
    exit_qemu(QemuExitCode::Success)
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    oneof_kernel::testutil::test_panic_handler(info)
}

/// Reads a character back from the text buffer.
fn vga_byte(row: usize, col: usize) -> u8 {
    let cell = (0xB8000 as *const u8).wrapping_add((row * 80 + col) * 2);
    // SAFETY: row and col stay inside the 80x25 buffer, which is always mapped.
    unsafe { core::ptr::read_volatile(cell) }
}

#[test_case]
fn text_reaches_the_vga_buffer() {
    // SAFETY: Tests run one at a time; nothing else draws.
    let mut screen = DisplaySurface::new(unsafe { VgaText::new() });
    screen.clear();
    screen.write_string("1of90OS", oneof_common::ColorCode::DEFAULT);
    assert_eq!(vga_byte(0, 0), b'1');
    assert_eq!(vga_byte(0, 6), b'S');
}

#[test_case]
fn many_lines_scroll_the_vga_buffer() {
    // SAFETY: As above.
    let mut screen = DisplaySurface::new(unsafe { VgaText::new() });
    screen.clear();
    for _ in 0..HEIGHT {
        screen.write_string("line\n", oneof_common::ColorCode::DEFAULT);
    }
    screen.write_string("last", oneof_common::ColorCode::DEFAULT);
    assert_eq!(screen.scroll_count(), 1);
    assert_eq!(vga_byte(HEIGHT - 1, 0), b'l');
    assert_eq!(vga_byte(HEIGHT - 1, 3), b't');
}

#[test_case]
fn commands_run_against_real_hardware() {
    // SAFETY: As above.
    let mut ctx = ConsoleContext::new(
        unsafe { VgaText::new() },
        Disconnected,
        None::<Disconnected>,
        Layout::Us,
    );
    Command::SetLayout(Layout::De).execute(&mut ctx);
    assert_eq!(ctx.layout(), Layout::De);
    Command::Clear.execute(&mut ctx);
    assert_eq!(ctx.screen().cursor(), (0, 0));
}

#[test_case]
fn breakpoint_returns() {
    let before = interrupts::breakpoint_count();
    x86_64::instructions::interrupts::int3();
    assert_eq!(interrupts::breakpoint_count(), before + 1);
}

#[test_case]
fn pci_scan_finds_the_host_bridge() {
    let mut devices = 0;
    pci::scan(|_| devices += 1);
    assert!(devices > 0);
}
