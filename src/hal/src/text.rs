//! Text-mode screen data.
//!
//! A [`Framebuffer`] is an 80x25 grid of [`Cell`]s together with a cursor and
//! the color attribute applied to new characters. Both the VGA driver and the
//! per-terminal snapshots render through it, so a character written to an
//! inactive terminal lands exactly where it would have landed on screen.

/// Number of columns in text mode.
pub const SCREEN_WIDTH: usize = 80;

/// Number of rows in text mode.
pub const SCREEN_HEIGHT: usize = 25;

/// Tab stops every this many columns.
const TAB_WIDTH: usize = 8;

/// VGA color codes.
///
/// Standard 16-color VGA palette for text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    /// Black color.
    Black = 0,
    /// Blue color.
    Blue = 1,
    /// Green color.
    Green = 2,
    /// Cyan color.
    Cyan = 3,
    /// Red color.
    Red = 4,
    /// Magenta color.
    Magenta = 5,
    /// Brown color.
    Brown = 6,
    /// Light gray color.
    LightGray = 7,
    /// Dark gray color.
    DarkGray = 8,
    /// Light blue color.
    LightBlue = 9,
    /// Light green color.
    LightGreen = 10,
    /// Light cyan color.
    LightCyan = 11,
    /// Light red color.
    LightRed = 12,
    /// Pink color.
    Pink = 13,
    /// Yellow color.
    Yellow = 14,
    /// White color.
    White = 15,
}

impl Color {
    /// Packs a foreground and background color into a cell attribute byte.
    pub const fn attribute(foreground: Color, background: Color) -> u8 {
        (background as u8) << 4 | (foreground as u8)
    }
}

/// A single character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct Cell {
    /// Code page 437 character.
    pub character: u8,
    /// Color attribute, background in the high nibble.
    pub color: u8,
}

impl Cell {
    /// An empty cell painted with `color`.
    pub const fn blank(color: u8) -> Self {
        Cell {
            character: b' ',
            color,
        }
    }
}

/// A full screen of cells, row major.
pub type CellBuffer = [[Cell; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// An in-memory screen: cells, cursor and current color.
#[derive(Clone)]
pub struct Framebuffer {
    cells: CellBuffer,
    line: usize,
    column: usize,
    color: u8,
}

impl Framebuffer {
    /// Creates a blank framebuffer with the cursor at the origin.
    pub const fn new(color: u8) -> Self {
        Framebuffer {
            cells: [[Cell::blank(color); SCREEN_WIDTH]; SCREEN_HEIGHT],
            line: 0,
            column: 0,
            color,
        }
    }

    /// The cell grid.
    pub fn cells(&self) -> &CellBuffer {
        &self.cells
    }

    /// Mutable access to the cell grid, used when capturing a live screen.
    pub fn cells_mut(&mut self) -> &mut CellBuffer {
        &mut self.cells
    }

    /// Overwrites the grid. Cursor and color are left alone.
    pub fn load(&mut self, cells: &CellBuffer) {
        self.cells = *cells;
    }

    /// Returns the cursor as `(line, column)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Moves the cursor, clamping it to the grid.
    pub fn set_cursor(&mut self, line: usize, column: usize) {
        self.line = line.min(SCREEN_HEIGHT - 1);
        self.column = column.min(SCREEN_WIDTH - 1);
    }

    /// Color attribute applied to new characters.
    pub fn color(&self) -> u8 {
        self.color
    }

    /// Sets the color attribute for subsequent writes.
    pub fn set_color(&mut self, color: u8) {
        self.color = color;
    }

    /// Character stored at `(line, column)`.
    pub fn char_at(&self, line: usize, column: usize) -> u8 {
        self.cells[line][column].character
    }

    /// Blanks every cell with the current color and homes the cursor.
    pub fn clear(&mut self) {
        for row in 0..SCREEN_HEIGHT {
            self.clear_row(row);
        }
        self.line = 0;
        self.column = 0;
    }

    /// Renders a run of bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Renders one byte at the cursor.
    ///
    /// Handles newline, carriage return, backspace and tab; everything else
    /// is stored verbatim. The cursor always stays inside the grid: writing
    /// the last column wraps, and moving past the last row scrolls.
    pub fn write_byte(&mut self, byte: u8) {
        match byte {
            b'\n' => self.new_line(),
            b'\r' => self.column = 0,
            0x08 => self.erase_previous(),
            b'\t' => {
                let stop = (self.column / TAB_WIDTH + 1) * TAB_WIDTH;
                while self.column < stop && self.column < SCREEN_WIDTH - 1 {
                    self.put(b' ');
                }
                if stop >= SCREEN_WIDTH {
                    self.new_line();
                }
            }
            byte => {
                self.put(byte);
                if self.column == SCREEN_WIDTH {
                    self.new_line();
                }
            }
        }
    }

    fn put(&mut self, byte: u8) {
        self.cells[self.line][self.column] = Cell {
            character: byte,
            color: self.color,
        };
        self.column += 1;
    }

    fn erase_previous(&mut self) {
        if self.column > 0 {
            self.column -= 1;
        } else if self.line > 0 {
            self.line -= 1;
            self.column = SCREEN_WIDTH - 1;
        } else {
            return;
        }
        self.cells[self.line][self.column] = Cell::blank(self.color);
    }

    fn new_line(&mut self) {
        self.column = 0;
        if self.line + 1 < SCREEN_HEIGHT {
            self.line += 1;
            return;
        }
        self.cells.copy_within(1.., 0);
        self.clear_row(SCREEN_HEIGHT - 1);
    }

    fn clear_row(&mut self, row: usize) {
        debug_assert!(row < SCREEN_HEIGHT, "row index out of bounds");
        self.cells[row] = [Cell::blank(self.color); SCREEN_WIDTH];
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new(Color::attribute(Color::LightGray, Color::Black))
    }
}
