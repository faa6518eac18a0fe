//! Device table.

use super::{CharDevice, Device};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use lumen_common::DeviceError;
use spin::Mutex;

/// Name to device map.
pub struct DeviceRegistry {
    devices: Mutex<BTreeMap<String, Device>>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            devices: Mutex::new(BTreeMap::new()),
        }
    }

    /// Publishes a device. Names must be unique.
    pub fn register(&self, device: Device) -> Result<(), DeviceError> {
        let mut devices = self.devices.lock();
        if devices.contains_key(&device.name) {
            return Err(DeviceError::AlreadyRegistered);
        }
        log::info!("device: registered {} ({:?})", device.name, device.kind);
        devices.insert(device.name.clone(), device);
        Ok(())
    }

    /// Finds a device by name.
    pub fn lookup(&self, name: &str) -> Option<Device> {
        self.devices.lock().get(name).cloned()
    }

    /// Looks up and opens a device.
    pub fn open(&self, name: &str, flags: u32) -> Result<Arc<dyn CharDevice>, DeviceError> {
        let device = self.lookup(name).ok_or(DeviceError::NotFound)?;
        if device.ops.open(flags) {
            Ok(device.ops)
        } else {
            Err(DeviceError::OpenRefused)
        }
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.devices.lock().keys().cloned().collect()
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
