//! System-wide error types for 1of90OS.

use core::fmt;

/// Hardware device error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeviceError {
    /// Device did not become ready within the polling limit
    Timeout,
    /// Device answered with something other than an acknowledgment
    Unacknowledged(u8),
    /// No device responded at the probed location
    NotPresent,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Timeout => write!(f, "device timed out"),
            DeviceError::Unacknowledged(byte) => {
                write!(f, "device replied {:#04x} instead of an acknowledgment", byte)
            }
            DeviceError::NotPresent => write!(f, "device not present"),
        }
    }
}
