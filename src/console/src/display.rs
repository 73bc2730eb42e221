//! Character-cell display surface.
//!
//! [`DisplaySurface`] owns an 80×25 grid of colored cells and a cursor. Every
//! cell change is forwarded to a [`CellDisplay`] backend (the VGA text buffer
//! on real hardware, a recorder in tests), so the grid is always the
//! authoritative copy of what is on screen.

use crate::cp437;
use core::fmt;
use oneof_common::ColorCode;
use oneof_hal::CellDisplay;

/// Number of columns.
pub const WIDTH: usize = 80;

/// Number of rows.
pub const HEIGHT: usize = 25;

/// Control byte that erases the character left of the cursor.
pub const BACKSPACE: u8 = 0x08;

/// A single character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Code page 437 character.
    pub byte: u8,
    /// Foreground and background attribute.
    pub color: ColorCode,
}

impl Cell {
    /// A space in the default color.
    pub const BLANK: Cell = Cell::blank(ColorCode::DEFAULT);

    /// A space in the given color.
    pub const fn blank(color: ColorCode) -> Cell {
        Cell { byte: b' ', color }
    }
}

/// Fixed-size console grid with a cursor and scroll-on-overflow.
///
/// The cursor row is always inside the grid. The column may equal [`WIDTH`]
/// right after a character was written into the last column; the wrap to
/// the next row is deferred until the next printable character or newline.
pub struct DisplaySurface<D> {
    cells: [[Cell; WIDTH]; HEIGHT],
    row: usize,
    col: usize,
    scrolls: usize,
    display: D,
}

impl<D: CellDisplay> DisplaySurface<D> {
    /// Creates a blank surface on top of `display`.
    ///
    /// The backend is not touched until the first write; call
    /// [`DisplaySurface::clear`] to bring it in sync.
    pub fn new(display: D) -> Self {
        Self {
            cells: [[Cell::BLANK; WIDTH]; HEIGHT],
            row: 0,
            col: 0,
            scrolls: 0,
            display,
        }
    }

    /// Writes one character, interpreting newline, carriage return and
    /// backspace.
    pub fn write_char(&mut self, byte: u8, color: ColorCode) {
        self.display.mirror_byte(byte);
        match byte {
            b'\n' => self.new_line(),
            b'\r' => {}
            BACKSPACE => {
                if self.col > 0 {
                    self.col -= 1;
                    self.put(self.row, self.col, Cell::blank(color));
                }
            }
            byte => {
                if self.col >= WIDTH {
                    self.new_line();
                }
                self.put(self.row, self.col, Cell { byte, color });
                self.col += 1;
            }
        }
        self.sync_cursor();
    }

    /// Writes a string, encoding non-ASCII characters to code page 437.
    pub fn write_string(&mut self, s: &str, color: ColorCode) {
        for c in s.chars() {
            self.write_char(cp437::encode(c), color);
        }
    }

    /// Blanks every cell and homes the cursor.
    pub fn clear(&mut self) {
        self.cells = [[Cell::BLANK; WIDTH]; HEIGHT];
        self.row = 0;
        self.col = 0;
        self.redraw();
        self.display.mirror_clear();
        self.sync_cursor();
    }

    /// Moves the cursor, clamping out-of-range positions into the grid.
    pub fn goto_cell(&mut self, row: usize, col: usize) {
        self.row = row.min(HEIGHT - 1);
        self.col = col.min(WIDTH - 1);
        self.sync_cursor();
    }

    /// Returns the cursor as `(row, col)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Returns the cell at `(row, col)`, or `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Returns the characters of one row.
    pub fn row_bytes(&self, row: usize) -> Option<[u8; WIDTH]> {
        let cells = self.cells.get(row)?;
        let mut bytes = [b' '; WIDTH];
        for (byte, cell) in bytes.iter_mut().zip(cells.iter()) {
            *byte = cell.byte;
        }
        Some(bytes)
    }

    /// Number of single-line scrolls performed so far.
    pub fn scroll_count(&self) -> usize {
        self.scrolls
    }

    /// Returns a formatter that writes in `color`.
    pub fn pen(&mut self, color: ColorCode) -> Pen<'_, D> {
        Pen {
            surface: self,
            color,
        }
    }

    /// Returns the backend.
    pub fn display(&self) -> &D {
        &self.display
    }

    fn new_line(&mut self) {
        if self.row + 1 < HEIGHT {
            self.row += 1;
        } else {
            self.scroll_up();
        }
        self.col = 0;
    }

    fn scroll_up(&mut self) {
        self.cells.copy_within(1.., 0);
        self.cells[HEIGHT - 1] = [Cell::BLANK; WIDTH];
        self.scrolls += 1;
        log::trace!("console scrolled ({} total)", self.scrolls);
        self.redraw();
    }

    fn put(&mut self, row: usize, col: usize, cell: Cell) {
        debug_assert!(row < HEIGHT && col < WIDTH, "cell out of bounds");
        self.cells[row][col] = cell;
        self.display.put_cell(row, col, cell.byte, cell.color.raw());
    }

    fn redraw(&mut self) {
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                self.display.put_cell(row, col, cell.byte, cell.color.raw());
            }
        }
    }

    fn sync_cursor(&mut self) {
        self.display.move_cursor(self.row, self.col.min(WIDTH - 1));
    }
}

/// A [`fmt::Write`] adapter writing to a surface in a fixed color.
pub struct Pen<'a, D> {
    surface: &'a mut DisplaySurface<D>,
    color: ColorCode,
}

impl<D: CellDisplay> fmt::Write for Pen<'_, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.surface.write_string(s, self.color);
        Ok(())
    }
}
