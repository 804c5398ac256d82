//! CPU client and allocator implementation

use super::device::CpuDevice;
use super::runtime::CpuRuntime;
use crate::runtime::{DefaultAllocator, Device, Runtime, RuntimeClient};
use tracing::debug;

/// CPU client for operation dispatch
///
/// All operation traits in [`crate::ops`] are implemented for this type.
#[derive(Clone, Debug)]
pub struct CpuClient {
    pub(crate) device: CpuDevice,
    allocator: CpuAllocator,
}

impl CpuClient {
    /// Create a new CPU client
    pub fn new(device: CpuDevice) -> Self {
        debug!(device = %device.name(), "creating cpu client");
        let allocator = DefaultAllocator::new(
            device.clone(),
            CpuRuntime::allocate,
            CpuRuntime::deallocate,
        );
        Self { device, allocator }
    }
}

impl RuntimeClient<CpuRuntime> for CpuClient {
    fn device(&self) -> &CpuDevice {
        &self.device
    }

    fn synchronize(&self) {
        // CPU operations are synchronous, nothing to do
    }

    fn allocator(&self) -> &CpuAllocator {
        &self.allocator
    }
}

/// CPU-specific allocator type alias
pub type CpuAllocator = DefaultAllocator<CpuDevice>;
