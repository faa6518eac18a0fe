//! System-wide error types for Lumen.

use core::fmt;

/// Errors returned by terminal reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TtyError {
    /// No keyboard was found when the terminals were initialized
    KeyboardUnavailable,
    /// The caller asked for zero bytes
    EmptyRead,
}

impl fmt::Display for TtyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TtyError::KeyboardUnavailable => write!(f, "keyboard unavailable"),
            TtyError::EmptyRead => write!(f, "zero-length read"),
        }
    }
}

/// Device table error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceError {
    /// No device is registered under the requested name
    NotFound,
    /// A device with the same name is already registered
    AlreadyRegistered,
    /// The device refused the open request
    OpenRefused,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::NotFound => write!(f, "no such device"),
            DeviceError::AlreadyRegistered => write!(f, "device name already registered"),
            DeviceError::OpenRefused => write!(f, "device refused open"),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn errors_render_human_messages() {
        assert_eq!(TtyError::KeyboardUnavailable.to_string(), "keyboard unavailable");
        assert_eq!(TtyError::EmptyRead.to_string(), "zero-length read");
        assert_eq!(DeviceError::NotFound.to_string(), "no such device");
    }
}
