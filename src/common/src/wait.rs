//! Bounded polling.
//!
//! Hardware status bits can stay stuck forever on broken or absent devices,
//! so every wait in the kernel goes through [`spin_until`] with an explicit
//! iteration limit.

use crate::error::DeviceError;

/// Polls `done` up to `limit` times, issuing a spin-loop hint between polls.
///
/// Returns the number of polls that were needed, or
/// [`DeviceError::Timeout`] if `done` never returned `true`.
pub fn spin_until<F>(limit: u32, mut done: F) -> Result<u32, DeviceError>
where
    F: FnMut() -> bool,
{
    for attempt in 1..=limit {
        if done() {
            return Ok(attempt);
        }
        core::hint::spin_loop();
    }
    Err(DeviceError::Timeout)
}

/// Burns roughly `iterations` spin-loop hints. Used as a settle delay.
pub fn settle(iterations: u32) {
    for _ in 0..iterations {
        core::hint::spin_loop();
    }
}
