//! Lumen console kernel.
//!
//! Three virtual text consoles multiplexed onto one VGA screen and fed by a
//! PS/2 keyboard, exposed to the rest of the kernel as the character devices
//! `tty1`..`tty3`.
//!
//! # Architecture
//!
//! The kernel is structured into the following modules:
//! - `tty`: scancode decoding, line editing and terminal switching
//! - `device`: the character device registry and the tty nodes
//! - `task`: the cooperative executor and the keyboard dispatcher task
//! - `arch`: platform-specific code (VGA, PS/2, serial)
//! - `config`: tunables and boot-time settings
//!
//! # Safety
//!
//! This is a `no_std` kernel library. All unsafe code is documented with
//! safety invariants explaining why the usage is correct.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod arch;
pub mod config;
pub mod device;
#[cfg(target_arch = "x86_64")]
pub mod logger;
pub mod task;
pub mod testutil;
pub mod tty;

#[cfg(target_arch = "x86_64")]
pub use init::{init, Console};

#[cfg(target_arch = "x86_64")]
mod init {
    use crate::arch::x86_64::{serial, Ps2Keyboard, VgaScreen};
    use crate::config::TtyConfig;
    use crate::device::{register_ttys, DeviceRegistry};
    use crate::tty::TtySystem;
    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicBool, Ordering};
    use lumen_common::DeviceError;

    static STARTED: AtomicBool = AtomicBool::new(false);

    /// The console stack on real hardware.
    pub type Console = TtySystem<VgaScreen, Ps2Keyboard>;

    /// Brings up the console stack.
    ///
    /// Starts the serial logger, takes over the VGA screen, probes for a
    /// keyboard and registers `tty1`..`tty3` in `registry`. Call early in
    /// boot, after the heap exists, then spawn
    /// [`crate::task::keyboard::keyboard_task`] on the returned system so
    /// async readers get input.
    ///
    /// # Errors
    ///
    /// Fails with [`DeviceError::AlreadyRegistered`] on a second call, or if
    /// `registry` already holds a tty node.
    pub fn init(
        config: &TtyConfig,
        registry: &DeviceRegistry,
    ) -> Result<Arc<Console>, DeviceError> {
        if STARTED.swap(true, Ordering::AcqRel) {
            return Err(DeviceError::AlreadyRegistered);
        }
        serial::init();
        if crate::logger::init(config.log_level).is_err() {
            // Someone else installed a logger first; keep using it.
            log::debug!("logger already installed");
        }

        // SAFETY: STARTED guarantees a single caller, and the console kernel
        // only runs on x86 hardware where the VGA text buffer is mapped.
        let screen = unsafe { VgaScreen::new() };
        let keyboard = Ps2Keyboard::probe();

        let tty = Arc::new(TtySystem::new(screen, keyboard, config));
        register_ttys(&tty, registry)?;
        log::info!("console ready");
        Ok(tty)
    }
}
