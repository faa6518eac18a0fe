//! Hosted stand-ins for the screen and keyboard.
//!
//! Both are cheap handles onto shared state, so a test can hand one clone
//! to a [`crate::tty::TtySystem`] and keep another to feed scancodes or
//! inspect what reached the display.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lumen_kernel::testutil::{MemoryScreen, ScriptedKeyboard};
//!
//! let screen = MemoryScreen::new();
//! let keyboard = ScriptedKeyboard::new(&[0x23, 0x1C]);
//! let tty = TtySystem::new(screen.clone(), Some(keyboard.clone()), &TtyConfig::default());
//! ```

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::sync::Arc;
use lumen_hal::{CellBuffer, Framebuffer, Keyboard, Screen, SCREEN_WIDTH};
use spin::Mutex;

/// A screen backed by an in-memory [`Framebuffer`].
#[derive(Clone, Default)]
pub struct MemoryScreen {
    framebuffer: Arc<Mutex<Framebuffer>>,
}

impl MemoryScreen {
    /// Creates a blank screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of row `line`, trailing blanks removed.
    pub fn text(&self, line: usize) -> String {
        let framebuffer = self.framebuffer.lock();
        let row: String = (0..SCREEN_WIDTH)
            .map(|column| framebuffer.char_at(line, column) as char)
            .collect();
        String::from(row.trim_end())
    }

    /// Color applied to new characters.
    pub fn color(&self) -> u8 {
        self.framebuffer.lock().color()
    }

    /// A copy of the whole display.
    pub fn snapshot(&self) -> Framebuffer {
        self.framebuffer.lock().clone()
    }
}

impl Screen for MemoryScreen {
    fn clear(&mut self) {
        self.framebuffer.lock().clear();
    }

    fn copy_from(&mut self, cells: &CellBuffer) {
        self.framebuffer.lock().load(cells);
    }

    fn copy_to(&self, cells: &mut CellBuffer) {
        *cells = *self.framebuffer.lock().cells();
    }

    fn cursor(&self) -> (usize, usize) {
        self.framebuffer.lock().cursor()
    }

    fn move_cursor(&mut self, line: usize, column: usize) {
        self.framebuffer.lock().set_cursor(line, column);
    }

    fn apply_color(&mut self, color: u8) {
        self.framebuffer.lock().set_color(color);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.framebuffer.lock().write_bytes(bytes);
    }
}

/// A keyboard that replays queued scancodes, then reports nothing pending.
#[derive(Clone, Default)]
pub struct ScriptedKeyboard {
    pending: Arc<Mutex<VecDeque<u8>>>,
}

impl ScriptedKeyboard {
    /// Creates a keyboard that will deliver `scancodes` in order.
    pub fn new(scancodes: &[u8]) -> Self {
        let keyboard = Self::default();
        keyboard.feed(scancodes);
        keyboard
    }

    /// Queues more scancodes.
    pub fn feed(&self, scancodes: &[u8]) {
        self.pending.lock().extend(scancodes.iter().copied());
    }

    /// Scancodes not yet read.
    pub fn remaining(&self) -> usize {
        self.pending.lock().len()
    }
}

impl Keyboard for ScriptedKeyboard {
    fn read_scancode(&mut self) -> Option<u8> {
        self.pending.lock().pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let screen = MemoryScreen::new();
        let mut writer = screen.clone();
        writer.write_bytes(b"shared  ");
        assert_eq!(screen.text(0), "shared");

        let keyboard = ScriptedKeyboard::new(&[1, 2]);
        let mut reader = keyboard.clone();
        assert_eq!(reader.read_scancode(), Some(1));
        assert_eq!(keyboard.remaining(), 1);
    }
}
