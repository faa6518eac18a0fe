//! A single virtual terminal.

use super::keymap::keys;
use super::line::LineBuffer;
use crate::config;
use core::fmt;
use lumen_hal::Framebuffer;

/// Number of virtual terminals.
pub const TTY_COUNT: usize = 3;

/// Handle to one of the virtual terminals.
///
/// Terminals live for the whole kernel lifetime, so a handle can never
/// dangle; it is just an index into the manager's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TtyId(usize);

impl TtyId {
    /// First terminal, active at boot.
    pub const TTY1: TtyId = TtyId(0);
    /// Second terminal.
    pub const TTY2: TtyId = TtyId(1);
    /// Third terminal.
    pub const TTY3: TtyId = TtyId(2);
    /// Every terminal, in order.
    pub const ALL: [TtyId; TTY_COUNT] = [Self::TTY1, Self::TTY2, Self::TTY3];

    /// Handle for a zero-based index.
    pub fn from_index(index: usize) -> Option<TtyId> {
        (index < TTY_COUNT).then_some(TtyId(index))
    }

    /// The terminal selected by Alt plus this function key, if any.
    pub fn for_function_key(key: u8) -> Option<TtyId> {
        match key {
            keys::F1 => Some(Self::TTY1),
            keys::F2 => Some(Self::TTY2),
            keys::F3 => Some(Self::TTY3),
            _ => None,
        }
    }

    /// Zero-based index.
    pub fn index(self) -> usize {
        self.0
    }

    /// Device name, `tty1` to `tty3`.
    pub fn name(self) -> &'static str {
        config::tty::DEVICE_NAMES[self.0]
    }
}

impl fmt::Display for TtyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One logical console.
///
/// The framebuffer is the terminal's own copy of its screen. Output always
/// lands here, whether or not the terminal is visible, so switching to it
/// only has to paint this copy.
pub struct VirtualTerminal {
    id: TtyId,
    framebuffer: Framebuffer,
    line: LineBuffer,
}

impl VirtualTerminal {
    /// Creates a blank terminal drawn in `color`.
    pub fn new(id: TtyId, color: u8) -> Self {
        VirtualTerminal {
            id,
            framebuffer: Framebuffer::new(color),
            line: LineBuffer::new(),
        }
    }

    /// This terminal's handle.
    pub fn id(&self) -> TtyId {
        self.id
    }

    /// Saved screen contents, cursor and color.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub(crate) fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Input line being edited.
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    pub(crate) fn line_mut(&mut self) -> &mut LineBuffer {
        &mut self.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_keys_map_to_terminals() {
        assert_eq!(TtyId::for_function_key(keys::F1), Some(TtyId::TTY1));
        assert_eq!(TtyId::for_function_key(keys::F2), Some(TtyId::TTY2));
        assert_eq!(TtyId::for_function_key(keys::F3), Some(TtyId::TTY3));
        assert_eq!(TtyId::for_function_key(0x3E), None);
    }

    #[test]
    fn test_names_and_indices() {
        assert_eq!(TtyId::TTY2.name(), "tty2");
        assert_eq!(TtyId::from_index(2), Some(TtyId::TTY3));
        assert_eq!(TtyId::from_index(3), None);
    }

    #[test]
    fn test_new_terminal_is_blank() {
        let vt = VirtualTerminal::new(TtyId::TTY3, 0x0C);
        assert_eq!(vt.framebuffer().cursor(), (0, 0));
        assert_eq!(vt.framebuffer().color(), 0x0C);
        assert!(vt.line().is_empty());
    }
}
