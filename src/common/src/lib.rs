//! Types shared by the 1of90OS console core and the kernel.
//!
//! - [`color`]: VGA text-mode palette and cell attributes
//! - [`error`]: device error taxonomy
//! - [`ps2`]: PS/2 controller register bits
//! - [`wait`]: bounded polling helpers

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod color;
pub mod error;
pub mod ps2;
pub mod wait;

pub use color::{Color, ColorCode};
pub use error::DeviceError;
