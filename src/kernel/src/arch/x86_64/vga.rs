//! VGA text mode screen for x86_64.
//!
//! Drives the text buffer at 0xB8000 and the CRT controller's hardware
//! cursor. All editing happens on a shadow [`Framebuffer`]; changed state is
//! then pushed to the hardware with volatile writes.

use core::ptr;
use lumen_hal::{CellBuffer, Framebuffer, Screen, SCREEN_WIDTH};
use x86_64::instructions::port::Port;

/// VGA text buffer memory-mapped I/O address.
const VGA_BUFFER_ADDR: usize = 0xB8000;

/// CRT controller index register.
const CRTC_INDEX: u16 = 0x3D4;

/// CRT controller data register.
const CRTC_DATA: u16 = 0x3D5;

/// Cursor location registers.
const CURSOR_HIGH: u8 = 0x0E;
const CURSOR_LOW: u8 = 0x0F;

/// Attribute used before any terminal picks its own.
const BOOT_COLOR: u8 = 0x07;

/// The physical VGA text screen.
pub struct VgaScreen {
    shadow: Framebuffer,
    /// SAFETY: valid for the lifetime of the kernel. The VGA buffer at
    /// 0xB8000 is always mapped in x86 protected and long mode.
    buffer: *mut CellBuffer,
}

// SAFETY: VgaScreen only touches the VGA buffer through volatile operations.
// The buffer is memory-mapped hardware that exists for the kernel's lifetime,
// and the owning TtySystem serializes access behind its console lock.
unsafe impl Send for VgaScreen {}

impl VgaScreen {
    /// Takes over the text screen, keeping what the bootloader left on it.
    ///
    /// # Safety
    ///
    /// Must be called at most once, on hardware with a VGA text buffer.
    pub unsafe fn new() -> Self {
        let mut screen = VgaScreen {
            shadow: Framebuffer::new(BOOT_COLOR),
            buffer: VGA_BUFFER_ADDR as *mut CellBuffer,
        };
        screen.capture();
        screen
    }

    /// Reads the hardware text and cursor into the shadow.
    fn capture(&mut self) {
        let buffer = self.buffer;
        for (row, line) in self.shadow.cells_mut().iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                // SAFETY: row < SCREEN_HEIGHT and col < SCREEN_WIDTH. Volatile
                // because the buffer is memory-mapped I/O.
                *cell = unsafe { ptr::read_volatile(&(*buffer)[row][col]) };
            }
        }

        let position = read_hardware_cursor() as usize;
        self.shadow
            .set_cursor(position / SCREEN_WIDTH, position % SCREEN_WIDTH);
    }

    /// Pushes the whole shadow to the hardware.
    fn flush(&mut self) {
        let cells = self.shadow.cells();
        for (row, line) in cells.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                // SAFETY: row < SCREEN_HEIGHT and col < SCREEN_WIDTH. Volatile
                // because the buffer is memory-mapped I/O.
                unsafe {
                    ptr::write_volatile(&mut (*self.buffer)[row][col], *cell);
                }
            }
        }
        self.sync_cursor();
    }

    fn sync_cursor(&self) {
        let (line, column) = self.shadow.cursor();
        write_hardware_cursor((line * SCREEN_WIDTH + column) as u16);
    }
}

fn read_hardware_cursor() -> u16 {
    let mut index: Port<u8> = Port::new(CRTC_INDEX);
    let mut data: Port<u8> = Port::new(CRTC_DATA);
    // SAFETY: 0x3D4/0x3D5 are the standard CRT controller ports; reading the
    // cursor registers has no side effects.
    unsafe {
        index.write(CURSOR_HIGH);
        let high = data.read() as u16;
        index.write(CURSOR_LOW);
        let low = data.read() as u16;
        (high << 8) | low
    }
}

fn write_hardware_cursor(position: u16) {
    let mut index: Port<u8> = Port::new(CRTC_INDEX);
    let mut data: Port<u8> = Port::new(CRTC_DATA);
    // SAFETY: 0x3D4/0x3D5 are the standard CRT controller ports and the
    // kernel runs with full I/O privilege.
    unsafe {
        index.write(CURSOR_LOW);
        data.write((position & 0xFF) as u8);
        index.write(CURSOR_HIGH);
        data.write((position >> 8) as u8);
    }
}

impl Screen for VgaScreen {
    fn clear(&mut self) {
        self.shadow.clear();
        self.flush();
    }

    fn copy_from(&mut self, cells: &CellBuffer) {
        self.shadow.load(cells);
        self.flush();
    }

    fn copy_to(&self, cells: &mut CellBuffer) {
        *cells = *self.shadow.cells();
    }

    fn cursor(&self) -> (usize, usize) {
        self.shadow.cursor()
    }

    fn move_cursor(&mut self, line: usize, column: usize) {
        self.shadow.set_cursor(line, column);
        self.sync_cursor();
    }

    fn apply_color(&mut self, color: u8) {
        self.shadow.set_color(color);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.shadow.write_bytes(bytes);
        self.flush();
    }
}
