//! Lumen Hardware Abstraction Layer (HAL) traits.
//!
//! This crate defines the seams between the terminal subsystem and the
//! hardware it drives: a character-cell screen and a scancode source. The
//! text-mode data types in [`text`] are shared by every screen backend so a
//! snapshot taken from one can be restored onto another.

#![no_std]
#![warn(missing_docs)]

pub mod text;

pub use text::{Cell, CellBuffer, Color, Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Trait for a physical character-cell display.
///
/// All writes are applied synchronously; there is no deferred flush.
pub trait Screen {
    /// Blanks every cell and homes the cursor.
    fn clear(&mut self);
    /// Overwrites the whole display with `cells`.
    fn copy_from(&mut self, cells: &CellBuffer);
    /// Copies the whole display into `cells`.
    fn copy_to(&self, cells: &mut CellBuffer);
    /// Returns the cursor as `(line, column)`.
    fn cursor(&self) -> (usize, usize);
    /// Moves the cursor to `(line, column)`, clamped to the grid.
    fn move_cursor(&mut self, line: usize, column: usize);
    /// Sets the color attribute used by subsequent writes.
    fn apply_color(&mut self, color: u8);
    /// Renders bytes at the cursor, advancing it.
    fn write_bytes(&mut self, bytes: &[u8]);
}

/// Trait for a byte-oriented keyboard device.
pub trait Keyboard {
    /// Reads one raw scancode, if one is pending. Never blocks.
    fn read_scancode(&mut self) -> Option<u8>;
}
