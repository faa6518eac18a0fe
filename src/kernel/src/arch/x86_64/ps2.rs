//! PS/2 keyboard controller for x86_64.

use lumen_hal::Keyboard;
use x86_64::instructions::port::{Port, PortReadOnly};

/// Controller data port.
const DATA_PORT: u16 = 0x60;

/// Controller status port.
const STATUS_PORT: u16 = 0x64;

/// Status bit set when the output buffer holds a byte.
const OUTPUT_FULL: u8 = 0x01;

/// Status value read from a floating bus.
const NO_CONTROLLER: u8 = 0xFF;

/// Polled PS/2 keyboard on the legacy 8042 ports.
pub struct Ps2Keyboard {
    data: Port<u8>,
    status: PortReadOnly<u8>,
}

impl Ps2Keyboard {
    /// Looks for a controller; `None` if the status port floats.
    pub fn probe() -> Option<Self> {
        let mut keyboard = Ps2Keyboard {
            data: Port::new(DATA_PORT),
            status: PortReadOnly::new(STATUS_PORT),
        };
        if keyboard.read_status() == NO_CONTROLLER {
            log::warn!("ps2: no controller at {:#x}", STATUS_PORT);
            return None;
        }
        log::info!("ps2: keyboard controller present");
        Some(keyboard)
    }

    fn read_status(&mut self) -> u8 {
        // SAFETY: 0x64 is the 8042 status register; reading it has no side
        // effects.
        unsafe { self.status.read() }
    }
}

impl Keyboard for Ps2Keyboard {
    fn read_scancode(&mut self) -> Option<u8> {
        if self.read_status() & OUTPUT_FULL == 0 {
            return None;
        }
        // SAFETY: the output buffer is full, so 0x60 holds a scancode and
        // reading it acknowledges the byte.
        Some(unsafe { self.data.read() })
    }
}
