//! QEMU test harness for kernel integration tests.
//!
//! Test binaries in `tests/` run on the bare machine, report over COM1 and
//! end the QEMU session through the `isa-debug-exit` device.
//!
//! ```rust,ignore
//! #![feature(custom_test_frameworks)]
//! #![test_runner(oneof_kernel::testutil::test_runner)]
//! ```

use crate::{serial_print, serial_println};

/// Port of the `isa-debug-exit` device (see `test-args` in Cargo.toml).
const DEBUG_EXIT_PORT: u16 = 0xf4;

/// QEMU exit codes for signaling test results.
///
/// QEMU exits with `(code << 1) | 1`, so success is reported as 33, which
/// is what `test-success-exit-code` expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum QemuExitCode {
    /// All tests passed.
    Success = 0x10,
    /// One or more tests failed.
    Failed = 0x11,
}

/// Ends the QEMU session with `exit_code`.
///
/// Halts if the exit device is missing, so a test binary started without
/// it stops instead of running off the end of `_start`.
pub fn exit_qemu(exit_code: QemuExitCode) -> ! {
    #[cfg(target_arch = "x86_64")]
    {
        use x86_64::instructions::port::PortWriteOnly;

        // SAFETY: Writing to the isa-debug-exit device port only terminates
        // QEMU; on a machine without the device the write is ignored.
        unsafe {
            PortWriteOnly::new(DEBUG_EXIT_PORT).write(exit_code as u32);
        }
    }
    crate::arch::halt_loop()
}

/// A test case that reports its own name.
pub trait Testable {
    /// Run the test and report results.
    fn run(&self);
}

impl<T: Fn()> Testable for T {
    fn run(&self) {
        serial_print!("{} ... ", core::any::type_name::<T>());
        self();
        serial_println!("[ok]");
    }
}

/// Runs every `#[test_case]` and exits QEMU with success.
pub fn test_runner(tests: &[&dyn Testable]) {
    serial_println!("running {} tests", tests.len());
    for test in tests {
        test.run();
    }
    exit_qemu(QemuExitCode::Success);
}

/// Reports the failing test and exits QEMU with failure.
///
/// ```rust,ignore
/// #[panic_handler]
/// fn panic(info: &PanicInfo) -> ! {
///     oneof_kernel::testutil::test_panic_handler(info)
/// }
/// ```
pub fn test_panic_handler(info: &core::panic::PanicInfo) -> ! {
    serial_println!("[failed]");
    serial_println!("Error: {}", info);
    exit_qemu(QemuExitCode::Failed)
}
