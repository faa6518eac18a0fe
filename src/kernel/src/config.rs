//! Kernel configuration constants.
//!
//! Groups the tunables of the console stack in one place; [`TtyConfig`]
//! carries the ones chosen at boot.

use crate::tty::TTY_COUNT;
use log::LevelFilter;
use lumen_hal::Color;

/// Terminal layer limits.
pub mod tty {
    /// Bytes per input line, including the slot that is never filled.
    pub const LINE_CAPACITY: usize = 1024;
    /// Completed lines kept per terminal while no reader collects them.
    pub const READY_LINES: usize = 16;
    /// Device names, in terminal order.
    pub const DEVICE_NAMES: [&str; super::TTY_COUNT] = ["tty1", "tty2", "tty3"];
}

/// Boot-time console settings.
#[derive(Debug, Clone)]
pub struct TtyConfig {
    /// Color attribute of each terminal.
    pub colors: [u8; TTY_COUNT],
    /// Depth of each terminal's completed-line queue.
    pub ready_lines: usize,
    /// Maximum level passed to the serial logger.
    pub log_level: LevelFilter,
}

impl Default for TtyConfig {
    fn default() -> Self {
        TtyConfig {
            colors: [
                Color::attribute(Color::LightGreen, Color::Black),
                Color::attribute(Color::LightCyan, Color::Black),
                Color::attribute(Color::LightRed, Color::Black),
            ],
            ready_lines: tty::READY_LINES,
            log_level: LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colors() {
        assert_eq!(TtyConfig::default().colors, [0x0A, 0x0B, 0x0C]);
    }
}
