//! Character device framework.
//!
//! Drivers implement [`CharDevice`] and are published by name in a
//! [`DeviceRegistry`]. The syscall layer looks devices up by name and
//! translates results with [`status`].

use alloc::string::String;
use alloc::sync::Arc;
use lumen_common::TtyError;

pub mod registry;
pub mod tty;

pub use registry::DeviceRegistry;
pub use tty::{register_ttys, TtyDevice};

/// Kind of device node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeviceType {
    /// Byte stream device.
    Character,
}

/// Operations a character device provides.
pub trait CharDevice: Send + Sync {
    /// Opens the device. Returns false to refuse.
    fn open(&self, flags: u32) -> bool;

    /// Closes the device.
    fn close(&self);

    /// Reads into `buf`, returning the number of bytes stored.
    fn read(&self, buf: &mut [u8]) -> Result<usize, TtyError>;

    /// Writes `bytes`, returning the number consumed.
    fn write(&self, bytes: &[u8]) -> usize;
}

/// A registered device node.
#[derive(Clone)]
pub struct Device {
    /// Node name, unique within a registry.
    pub name: String,
    /// Node kind.
    pub kind: DeviceType,
    /// Driver operations.
    pub ops: Arc<dyn CharDevice>,
}

impl Device {
    /// Describes a character device.
    pub fn character(name: &str, ops: Arc<dyn CharDevice>) -> Self {
        Device {
            name: String::from(name),
            kind: DeviceType::Character,
            ops,
        }
    }
}

/// Converts a read result to the syscall convention: byte count, or -1.
pub fn status(result: Result<usize, TtyError>) -> isize {
    match result {
        Ok(count) => count as isize,
        Err(_) => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status(Ok(2)), 2);
        assert_eq!(status(Ok(0)), 0);
        assert_eq!(status(Err(TtyError::EmptyRead)), -1);
        assert_eq!(status(Err(TtyError::KeyboardUnavailable)), -1);
    }
}
