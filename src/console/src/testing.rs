//! Host-side doubles for the HAL traits.

use crate::context::ConsoleContext;
use crate::cp437;
use crate::display::{DisplaySurface, HEIGHT};
use crate::layout::Layout;
use oneof_hal::{ByteSource, CellDisplay};
use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

/// Records everything pushed to it.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub writes: Vec<(usize, usize, u8, u8)>,
    pub mirrored: Vec<u8>,
    pub cursor: (usize, usize),
    pub clears: usize,
}

impl CellDisplay for RecordingDisplay {
    fn put_cell(&mut self, row: usize, col: usize, byte: u8, attr: u8) {
        self.writes.push((row, col, byte, attr));
    }

    fn move_cursor(&mut self, row: usize, col: usize) {
        self.cursor = (row, col);
    }

    fn mirror_byte(&mut self, byte: u8) {
        self.mirrored.push(byte);
    }

    fn mirror_clear(&mut self) {
        self.clears += 1;
    }
}

/// Replays a fixed byte sequence, then reports "not ready" forever.
#[derive(Debug, Default)]
pub struct Script {
    bytes: VecDeque<u8>,
}

impl Script {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl ByteSource for Script {
    fn is_ready(&mut self) -> bool {
        !self.bytes.is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        self.bytes.pop_front().unwrap_or(0)
    }
}

pub type TestConsole = ConsoleContext<RecordingDisplay, Script, Script>;

/// A US-layout console whose keyboard replays `scancodes`.
pub fn context(scancodes: &[u8]) -> TestConsole {
    ConsoleContext::new(
        RecordingDisplay::default(),
        Script::new(scancodes),
        None,
        Layout::Us,
    )
}

/// A US-layout console with an idle keyboard and a serial mirror that
/// replays `bytes`.
pub fn serial_context(bytes: &[u8]) -> TestConsole {
    ConsoleContext::new(
        RecordingDisplay::default(),
        Script::new(&[]),
        Some(Script::new(bytes)),
        Layout::Us,
    )
}

/// Press and release scancodes typing `text` on the US layout.
pub fn typed(text: &str) -> Vec<u8> {
    let table = Layout::Us.table();
    let mut out = Vec::new();
    for byte in text.bytes() {
        let code = table
            .iter()
            .position(|&b| b == byte)
            .unwrap_or_else(|| panic!("no US key for {:?}", byte as char)) as u8;
        out.push(code);
        out.push(code | 0x80);
    }
    out
}

/// One row of the surface, decoded to text.
pub fn row_text<D: CellDisplay>(surface: &DisplaySurface<D>, row: usize) -> String {
    surface
        .row_bytes(row)
        .map(|bytes| {
            bytes
                .iter()
                .map(|&b| cp437::decode(b).unwrap_or('?'))
                .collect()
        })
        .unwrap_or_default()
}

/// All rows, trailing blanks trimmed, joined by newlines.
pub fn screen_text<D: CellDisplay>(surface: &DisplaySurface<D>) -> String {
    (0..HEIGHT)
        .map(|row| String::from(row_text(surface, row).trim_end()))
        .collect::<Vec<_>>()
        .join("\n")
}
