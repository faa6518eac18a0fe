//! x86_64 console hardware: VGA text screen, PS/2 keyboard and COM1.

pub mod ps2;
pub mod serial;
pub mod vga;

pub use ps2::Ps2Keyboard;
pub use vga::VgaScreen;
