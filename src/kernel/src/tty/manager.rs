//! Virtual terminal table and console switching.

use super::terminal::{TtyId, VirtualTerminal, TTY_COUNT};
use lumen_hal::Screen;

/// Owns every terminal and knows which one is on screen.
pub struct TerminalManager {
    terminals: [VirtualTerminal; TTY_COUNT],
    active: TtyId,
}

impl TerminalManager {
    /// Creates the terminals with their colors. The first one is active.
    pub fn new(colors: [u8; TTY_COUNT]) -> Self {
        TerminalManager {
            terminals: TtyId::ALL.map(|id| VirtualTerminal::new(id, colors[id.index()])),
            active: TtyId::TTY1,
        }
    }

    /// Makes the active terminal take over what is already on screen.
    ///
    /// Used once at boot so early kernel output stays visible on the first
    /// terminal.
    pub fn adopt_screen<S: Screen>(&mut self, screen: &mut S) {
        let terminal = &mut self.terminals[self.active.index()];
        let framebuffer = terminal.framebuffer_mut();
        screen.copy_to(framebuffer.cells_mut());
        let (line, column) = screen.cursor();
        framebuffer.set_cursor(line, column);
        screen.apply_color(framebuffer.color());
    }

    /// The terminal currently on screen.
    pub fn active(&self) -> TtyId {
        self.active
    }

    /// Shared access to a terminal.
    pub fn terminal(&self, id: TtyId) -> &VirtualTerminal {
        &self.terminals[id.index()]
    }

    /// Exclusive access to a terminal.
    pub fn terminal_mut(&mut self, id: TtyId) -> &mut VirtualTerminal {
        &mut self.terminals[id.index()]
    }

    /// Puts `target` on screen.
    ///
    /// The outgoing terminal needs no saving: every write to it already
    /// went to its framebuffer as well as the screen.
    pub fn switch_to<S: Screen>(&mut self, target: TtyId, screen: &mut S) {
        let framebuffer = self.terminals[target.index()].framebuffer();
        screen.clear();
        screen.copy_from(framebuffer.cells());
        screen.apply_color(framebuffer.color());
        let (line, column) = framebuffer.cursor();
        screen.move_cursor(line, column);
        self.active = target;
    }

    /// Renders `bytes` on terminal `id`, and on screen too if it is active.
    ///
    /// Returns the number of bytes consumed, always `bytes.len()`.
    pub fn write<S: Screen>(&mut self, id: TtyId, bytes: &[u8], screen: &mut S) -> usize {
        self.terminals[id.index()]
            .framebuffer_mut()
            .write_bytes(bytes);
        if id == self.active {
            screen.write_bytes(bytes);
        }
        bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemoryScreen;

    fn manager() -> TerminalManager {
        TerminalManager::new([0x0A, 0x0B, 0x0C])
    }

    #[test]
    fn test_write_to_inactive_terminal_leaves_screen_alone() {
        let mut screen = MemoryScreen::new();
        let mut manager = manager();

        manager.write(TtyId::TTY2, b"A", &mut screen);

        assert_eq!(screen.text(0), "");
        assert_eq!(manager.terminal(TtyId::TTY2).framebuffer().char_at(0, 0), b'A');
    }

    #[test]
    fn test_write_to_active_terminal_goes_to_both() {
        let mut screen = MemoryScreen::new();
        let mut manager = manager();

        let written = manager.write(TtyId::TTY1, b"boot", &mut screen);

        assert_eq!(written, 4);
        assert_eq!(screen.text(0), "boot");
        assert_eq!(manager.terminal(TtyId::TTY1).framebuffer().cursor(), (0, 4));
    }

    #[test]
    fn test_switch_restores_contents_cursor_and_color() {
        let mut screen = MemoryScreen::new();
        let mut manager = manager();
        manager.write(TtyId::TTY1, b"one", &mut screen);
        manager.write(TtyId::TTY2, b"A", &mut screen);

        manager.switch_to(TtyId::TTY2, &mut screen);

        assert_eq!(manager.active(), TtyId::TTY2);
        assert_eq!(screen.text(0), "A");
        assert_eq!(screen.cursor(), (0, 1));
        assert_eq!(screen.color(), 0x0B);

        manager.switch_to(TtyId::TTY1, &mut screen);
        assert_eq!(screen.text(0), "one");
        assert_eq!(screen.cursor(), (0, 3));
        assert_eq!(screen.color(), 0x0A);
    }

    #[test]
    fn test_terminals_stay_independent_across_switches() {
        let mut screen = MemoryScreen::new();
        let mut manager = manager();
        manager.switch_to(TtyId::TTY3, &mut screen);
        manager.write(TtyId::TTY3, b"third\n", &mut screen);
        manager.switch_to(TtyId::TTY1, &mut screen);
        manager.write(TtyId::TTY1, b"first", &mut screen);
        manager.switch_to(TtyId::TTY3, &mut screen);

        assert_eq!(screen.text(0), "third");
        assert_eq!(screen.cursor(), (1, 0));
        assert_eq!(manager.terminal(TtyId::TTY1).framebuffer().char_at(0, 0), b'f');
    }

    #[test]
    fn test_adopt_screen_captures_boot_output() {
        let mut screen = MemoryScreen::new();
        screen.write_bytes(b"booting\nok");
        let mut manager = manager();

        manager.adopt_screen(&mut screen);

        let framebuffer = manager.terminal(TtyId::TTY1).framebuffer();
        assert_eq!(framebuffer.char_at(1, 1), b'k');
        assert_eq!(framebuffer.cursor(), (1, 2));
        assert_eq!(screen.color(), 0x0A);
    }
}
