//! National keyboard layouts.
//!
//! Each [`Layout`] owns a 128-entry table from set-1 scancode to base
//! character in code page 437. A zero entry means the key is unmapped.
//! Entries for Backspace (0x0E) and Enter (0x1C) hold the control bytes
//! `0x08` and `\n`.

/// Scancode-to-character table of one layout.
pub type Table = [u8; 128];

/// Builds a full table from sparse `(scancode, character)` pairs.
const fn table(entries: &[(u8, u8)]) -> Table {
    let mut map = [0u8; 128];
    let mut i = 0;
    while i < entries.len() {
        let (code, byte) = entries[i];
        map[code as usize] = byte;
        i += 1;
    }
    map
}

static US: Table = table(&[
    (0x02, b'1'), (0x03, b'2'), (0x04, b'3'), (0x05, b'4'), (0x06, b'5'),
    (0x07, b'6'), (0x08, b'7'), (0x09, b'8'), (0x0A, b'9'), (0x0B, b'0'),
    (0x0C, b'-'), (0x0D, b'='), (0x0E, 0x08),
    (0x10, b'q'), (0x11, b'w'), (0x12, b'e'), (0x13, b'r'), (0x14, b't'),
    (0x15, b'y'), (0x16, b'u'), (0x17, b'i'), (0x18, b'o'), (0x19, b'p'),
    (0x1A, b'['), (0x1B, b']'), (0x1C, b'\n'),
    (0x1E, b'a'), (0x1F, b's'), (0x20, b'd'), (0x21, b'f'), (0x22, b'g'),
    (0x23, b'h'), (0x24, b'j'), (0x25, b'k'), (0x26, b'l'), (0x27, b';'),
    (0x28, b'\''), (0x29, b'`'), (0x2B, b'\\'),
    (0x2C, b'z'), (0x2D, b'x'), (0x2E, b'c'), (0x2F, b'v'), (0x30, b'b'),
    (0x31, b'n'), (0x32, b'm'), (0x33, b','), (0x34, b'.'), (0x35, b'/'),
    (0x39, b' '),
]);

// German QWERTZ: ß ü ö ä at their native positions.
static DE: Table = table(&[
    (0x02, b'1'), (0x03, b'2'), (0x04, b'3'), (0x05, b'4'), (0x06, b'5'),
    (0x07, b'6'), (0x08, b'7'), (0x09, b'8'), (0x0A, b'9'), (0x0B, b'0'),
    (0x0C, 0xE1), (0x0D, b'='), (0x0E, 0x08),
    (0x10, b'q'), (0x11, b'w'), (0x12, b'e'), (0x13, b'r'), (0x14, b't'),
    (0x15, b'z'), (0x16, b'u'), (0x17, b'i'), (0x18, b'o'), (0x19, b'p'),
    (0x1A, 0x81), (0x1B, b'+'), (0x1C, b'\n'),
    (0x1E, b'a'), (0x1F, b's'), (0x20, b'd'), (0x21, b'f'), (0x22, b'g'),
    (0x23, b'h'), (0x24, b'j'), (0x25, b'k'), (0x26, b'l'), (0x27, 0x94),
    (0x28, 0x84), (0x29, b'^'), (0x2B, b'#'),
    (0x2C, b'y'), (0x2D, b'x'), (0x2E, b'c'), (0x2F, b'v'), (0x30, b'b'),
    (0x31, b'n'), (0x32, b'm'), (0x33, b','), (0x34, b'.'), (0x35, b'/'),
    (0x39, b' '),
]);

// French AZERTY, unshifted digit row. The digit-row ç sits on 0x0A.
static FR: Table = table(&[
    (0x02, b'&'), (0x03, 0x82), (0x04, b'"'), (0x05, b'\''), (0x06, b'('),
    (0x07, b'-'), (0x08, 0x8A), (0x09, b'_'), (0x0A, 0x87), (0x0B, b'a'),
    (0x0C, b')'), (0x0D, b'='), (0x0E, 0x08),
    (0x10, b'a'), (0x11, b'z'), (0x12, 0x88), (0x13, b'r'), (0x14, b't'),
    (0x15, b'y'), (0x16, b'u'), (0x17, b'i'), (0x18, b'o'), (0x19, b'p'),
    (0x1A, b'['), (0x1B, b']'), (0x1C, b'\n'),
    (0x1E, b'q'), (0x1F, b's'), (0x20, b'd'), (0x21, b'f'), (0x22, b'g'),
    (0x23, b'h'), (0x24, b'j'), (0x25, b'k'), (0x26, b'l'), (0x27, b'm'),
    (0x28, b'u'), (0x29, b'`'), (0x2B, b'\\'),
    (0x2C, b'w'), (0x2D, b'x'), (0x2E, b'c'), (0x2F, b'v'), (0x30, b'b'),
    (0x31, b'n'), (0x32, b','), (0x33, b';'), (0x34, b':'), (0x35, b'/'),
    (0x39, b' '),
]);

// Italian QWERTY: è ò à on the right-hand punctuation keys.
static IT: Table = table(&[
    (0x02, b'1'), (0x03, b'2'), (0x04, b'3'), (0x05, b'4'), (0x06, b'5'),
    (0x07, b'6'), (0x08, b'7'), (0x09, b'8'), (0x0A, b'9'), (0x0B, b'0'),
    (0x0C, b'-'), (0x0D, b'='), (0x0E, 0x08),
    (0x10, b'q'), (0x11, b'w'), (0x12, b'e'), (0x13, b'r'), (0x14, b't'),
    (0x15, b'y'), (0x16, b'u'), (0x17, b'i'), (0x18, b'o'), (0x19, b'p'),
    (0x1A, 0x8A), (0x1B, b'+'), (0x1C, b'\n'),
    (0x1E, b'a'), (0x1F, b's'), (0x20, b'd'), (0x21, b'f'), (0x22, b'g'),
    (0x23, b'h'), (0x24, b'j'), (0x25, b'k'), (0x26, b'l'), (0x27, 0x95),
    (0x28, 0x85), (0x29, b'`'), (0x2B, b'\\'),
    (0x2C, b'z'), (0x2D, b'x'), (0x2E, b'c'), (0x2F, b'v'), (0x30, b'b'),
    (0x31, b'n'), (0x32, b'm'), (0x33, b','), (0x34, b'.'), (0x35, b'/'),
    (0x39, b' '),
]);

// Spanish QWERTY: á on A, é on E, ñ next to L.
static ES: Table = table(&[
    (0x02, b'1'), (0x03, b'2'), (0x04, b'3'), (0x05, b'4'), (0x06, b'5'),
    (0x07, b'6'), (0x08, b'7'), (0x09, b'8'), (0x0A, b'9'), (0x0B, b'0'),
    (0x0C, b'-'), (0x0D, b'='), (0x0E, 0x08),
    (0x10, b'q'), (0x11, b'w'), (0x12, 0x82), (0x13, b'r'), (0x14, b't'),
    (0x15, b'y'), (0x16, b'u'), (0x17, b'i'), (0x18, b'o'), (0x19, b'p'),
    (0x1A, b'['), (0x1B, b']'), (0x1C, b'\n'),
    (0x1E, 0xA0), (0x1F, b's'), (0x20, b'd'), (0x21, b'f'), (0x22, b'g'),
    (0x23, b'h'), (0x24, b'j'), (0x25, b'k'), (0x26, b'l'), (0x27, 0xA4),
    (0x28, b'\''), (0x29, b'`'), (0x2B, b'\\'),
    (0x2C, b'z'), (0x2D, b'x'), (0x2E, b'c'), (0x2F, b'v'), (0x30, b'b'),
    (0x31, b'n'), (0x32, b'm'), (0x33, b','), (0x34, b'.'), (0x35, b'/'),
    (0x39, b' '),
]);
/// A keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// US QWERTY.
    #[default]
    Us,
    /// German QWERTZ.
    De,
    /// French AZERTY.
    Fr,
    /// Italian QWERTY.
    It,
    /// Spanish QWERTY.
    Es,
}

impl Layout {
    /// All layouts, in menu order.
    pub const ALL: [Layout; 5] = [Layout::Us, Layout::De, Layout::Fr, Layout::It, Layout::Es];

    /// Position in [`Layout::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Layout at `index` in [`Layout::ALL`].
    pub fn from_index(index: usize) -> Option<Layout> {
        Self::ALL.get(index).copied()
    }

    /// Short name shown in the prompt and accepted by `layout <name>`.
    pub fn name(self) -> &'static str {
        match self {
            Layout::Us => "us",
            Layout::De => "de",
            Layout::Fr => "fr",
            Layout::It => "it",
            Layout::Es => "es",
        }
    }

    /// Menu title.
    pub fn title(self) -> &'static str {
        match self {
            Layout::Us => "US QWERTY",
            Layout::De => "DE QWERTZ",
            Layout::Fr => "FR AZERTY",
            Layout::It => "IT QWERTY",
            Layout::Es => "ES QWERTY",
        }
    }

    /// Looks a layout up by its short name, ignoring ASCII case.
    pub fn from_name(name: &[u8]) -> Option<Layout> {
        Self::ALL
            .iter()
            .copied()
            .find(|layout| layout.name().as_bytes().eq_ignore_ascii_case(name))
    }

    /// The scancode table.
    pub fn table(self) -> &'static Table {
        match self {
            Layout::Us => &US,
            Layout::De => &DE,
            Layout::Fr => &FR,
            Layout::It => &IT,
            Layout::Es => &ES,
        }
    }

    /// Base character for `code`, or `None` if unmapped.
    pub fn lookup(self, code: u8) -> Option<u8> {
        match self.table().get(usize::from(code)) {
            Some(&0) | None => None,
            Some(&byte) => Some(byte),
        }
    }
}
