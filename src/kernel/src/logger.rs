//! Kernel logger.
//!
//! Implements the `log::Log` trait to route log messages to COM1. Filtering
//! is done by `log`'s max level, set at init.

use crate::serial_println;
use log::{LevelFilter, Metadata, Record, SetLoggerError};

static LOGGER: SerialLogger = SerialLogger;

struct SerialLogger;

impl log::Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            serial_println!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs the serial logger.
///
/// # Errors
///
/// Fails if a logger was already installed.
pub fn init(max_level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(max_level);
    serial_println!("[KERNEL] Logger initialized with level: {}", max_level);
    Ok(())
}
