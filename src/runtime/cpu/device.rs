//! CPU device implementation

use crate::runtime::{Device, DeviceKind};

/// CPU device
///
/// The host is normally a single device with ordinal 0. Distinct ordinals can
/// be created to partition host memory between logical devices; tensors on
/// different ordinals are never mixed by an operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CpuDevice {
    id: usize,
}

impl CpuDevice {
    /// Create the default CPU device (ordinal 0)
    pub fn new() -> Self {
        Self { id: 0 }
    }

    /// Create a logical CPU device with the given ordinal
    pub fn with_id(id: usize) -> Self {
        Self { id }
    }
}

impl Device for CpuDevice {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Cpu
    }

    fn id(&self) -> usize {
        self.id
    }
}
