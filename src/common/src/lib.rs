//! Plain data shared between the Lumen kernel crates.
//!
//! Nothing in here touches hardware; the types are safe to use from host
//! tests and from any architecture.

#![no_std]
#![warn(missing_docs)]

pub mod error;
pub mod modifiers;

pub use error::{DeviceError, TtyError};
pub use modifiers::KeyModifiers;
