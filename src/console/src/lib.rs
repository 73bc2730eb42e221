//! Hardware-independent core of the 1of90OS console.
//!
//! Everything here talks to the machine only through the [`oneof_hal`]
//! traits, so the whole console (screen grid, scancode translation, shell
//! and layout menu) runs unchanged in host unit tests.
//!
//! - [`display`]: 80×25 cell grid with cursor and scrolling
//! - [`keyboard`] and [`layout`]: set-1 scancode decoding for five layouts
//! - [`input`]: keyboard and serial mirror multiplexing
//! - [`shell`], [`commands`] and [`menu`]: the interactive surface

#![cfg_attr(not(test), no_std)]

pub mod commands;
pub mod context;
pub mod cp437;
pub mod display;
pub mod input;
pub mod keyboard;
pub mod layout;
pub mod menu;
pub mod palette;
pub mod shell;

#[cfg(test)]
mod testing;

pub use commands::{Command, VERSION};
pub use context::{idle, ConsoleContext};
pub use display::{Cell, DisplaySurface, HEIGHT, WIDTH};
pub use keyboard::{Key, ScancodeTranslator};
pub use layout::Layout;
pub use shell::Shell;
