//! 1of90OS Kernel Entry Point
//!
//! This is the main entry point for the 1of90OS kernel.

#![no_std]
#![no_main]

use bootloader::{entry_point, BootInfo};
use core::fmt::Write;
use core::panic::PanicInfo;
use oneof_common::{Color, ColorCode};
use oneof_console::{ConsoleContext, DisplaySurface, Layout, Shell};
use oneof_kernel::arch::{self, interrupts, pci, ps2::Ps2Controller, serial, vga::VgaText};
use oneof_kernel::boot::{self, banner, Status};
use oneof_kernel::{serial_println, Console};

entry_point!(kernel_main);

/// Kernel entry point.
///
/// Called by the bootloader after setting up the initial environment.
fn kernel_main(_boot_info: &'static BootInfo) -> ! {
    // ========================================================================
    // Phase 1: Core Initialization (serial, logger, GDT, IDT)
    // ========================================================================
    oneof_kernel::init();
    log::info!("1of90OS v{} starting", oneof_console::VERSION);

    // SAFETY: These are the only handles to the text buffer, the PS/2
    // controller and the COM1 receive side for the rest of the kernel's life.
    let mut console: Console = unsafe {
        ConsoleContext::new(
            VgaText::new(),
            Ps2Controller::new(),
            Some(serial::SerialInput),
            Layout::default(),
        )
    };

    console.screen_mut().clear();
    banner::print_banner(console.screen_mut());

    // ========================================================================
    // Phase 2: Boot Logging
    // ========================================================================
    boot::log(console.screen_mut(), Status::Ok, "Serial console on COM1");
    boot::log(console.screen_mut(), Status::Ok, "Exception handlers installed");

    x86_64::instructions::interrupts::int3();
    if interrupts::breakpoint_count() > 0 {
        boot::log(console.screen_mut(), Status::Ok, "Exception handling verified");
    } else {
        boot::log(console.screen_mut(), Status::Fail, "Breakpoint handler did not run");
    }

    enable_keyboard(&mut console);
    report_usb(&mut console);

    // ========================================================================
    // Phase 3: Shell
    // ========================================================================
    banner::print_hint(console.screen_mut());
    log::info!("boot complete");

    Shell::new().run(&mut console)
}

/// Enables the PS/2 keyboard port. Failures are reported but not fatal: the
/// serial console still accepts input.
fn enable_keyboard(console: &mut Console) {
    let controller = console.input_mut().keyboard_mut();
    let result = match controller.enable() {
        Ok(drained) => {
            log::debug!("ps/2 port enabled, {} stale bytes drained", drained);
            controller
                .enable_scanning()
                .map_err(|err| ("PS/2 keyboard", err))
        }
        Err(err) => Err(("PS/2 controller", err)),
    };

    match result {
        Ok(()) => boot::log(console.screen_mut(), Status::Ok, "PS/2 keyboard enabled"),
        Err((device, err)) => {
            log::warn!("{}: {}", device, err);
            boot::log(
                console.screen_mut(),
                Status::Warn,
                format_args!("{}: {}", device, err),
            );
        }
    }
}

/// Lists USB host controllers found on the PCI buses.
fn report_usb(console: &mut Console) {
    let screen = console.screen_mut();
    let found = pci::scan_usb(|dev, kind| {
        log::info!("usb controller {} ({})", dev.addr, kind);
        boot::log(
            &mut *screen,
            Status::Info,
            format_args!(
                "USB: {} V={:04X} D={:04X} ({})",
                dev.addr, dev.vendor_id, dev.device_id, kind
            ),
        );
    });
    if found == 0 {
        boot::log(screen, Status::Warn, "No USB controllers found.");
    }
}

/// Panic handler.
///
/// Reports on COM1, then repaints the screen with the message in light red.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    // SAFETY: Nothing that was interrupted by the panic runs again.
    unsafe { serial::force_unlock() };
    serial_println!("KERNEL PANIC: {}", info);

    // SAFETY: The console that owned the text buffer never runs again.
    let mut screen = DisplaySurface::new(unsafe { VgaText::new() }.without_mirror());
    screen.clear();
    let _ = writeln!(
        screen.pen(ColorCode::on_black(Color::LightRed)),
        "!!! KERNEL PANIC !!!\n\n{}",
        info
    );

    arch::halt_loop()
}
