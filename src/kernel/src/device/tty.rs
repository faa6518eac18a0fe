//! `tty1`..`tty3` device nodes.

use super::{CharDevice, Device, DeviceRegistry};
use crate::tty::{TtyId, TtySystem};
use alloc::sync::Arc;
use lumen_common::{DeviceError, TtyError};
use lumen_hal::{Keyboard, Screen};

/// Device view of one virtual terminal.
///
/// Holds a terminal handle rather than the terminal itself; the
/// [`TtySystem`] owns all terminals.
pub struct TtyDevice<S, K> {
    tty: Arc<TtySystem<S, K>>,
    id: TtyId,
}

impl<S, K> TtyDevice<S, K> {
    /// Binds terminal `id` of `tty`.
    pub fn new(tty: Arc<TtySystem<S, K>>, id: TtyId) -> Self {
        TtyDevice { tty, id }
    }

    /// The terminal this node reads from and writes to.
    pub fn id(&self) -> TtyId {
        self.id
    }
}

impl<S, K> CharDevice for TtyDevice<S, K>
where
    S: Screen + Send,
    K: Keyboard + Send,
{
    fn open(&self, _flags: u32) -> bool {
        true
    }

    fn close(&self) {}

    fn read(&self, buf: &mut [u8]) -> Result<usize, TtyError> {
        self.tty.read(self.id, buf)
    }

    fn write(&self, bytes: &[u8]) -> usize {
        self.tty.write(self.id, bytes)
    }
}

/// Registers one device node per terminal.
pub fn register_ttys<S, K>(
    tty: &Arc<TtySystem<S, K>>,
    registry: &DeviceRegistry,
) -> Result<(), DeviceError>
where
    S: Screen + Send + 'static,
    K: Keyboard + Send + 'static,
{
    for id in TtyId::ALL {
        let node = TtyDevice::new(Arc::clone(tty), id);
        registry.register(Device::character(id.name(), Arc::new(node)))?;
    }
    Ok(())
}
