//! Runtime backends for tensor computation
//!
//! This module defines the `Runtime` trait, the boundary to the device and
//! memory collaborators, and the host reference backend.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (device kind + device id)
//! ├── Client (dispatches operations, synchronizes)
//! └── Allocator (block allocation for a device)
//! ```

mod allocator;

#[cfg(feature = "cpu")]
pub mod cpu;

pub use allocator::{Allocator, DefaultAllocator};

use crate::error::Result;
use std::fmt;

/// Core trait for compute backends
///
/// `Runtime` abstracts over the device/runtime context: memory allocation,
/// synchronous copies and device selection. It uses static dispatch via
/// generics, so a tensor's backend is part of its type.
///
/// Device pointers are carried as `u64` handles.
pub trait Runtime: Clone + Send + Sync + 'static {
    /// Device identifier type
    type Device: Device;

    /// Client for dispatching operations
    type Client: RuntimeClient<Self>;

    /// Memory allocator type
    type Allocator: Allocator;

    /// Human-readable name of this runtime
    fn name() -> &'static str;

    /// Allocate `size_bytes` of device memory
    ///
    /// Returns a device pointer; zero-sized requests return the null handle.
    fn allocate(size_bytes: usize, device: &Self::Device) -> Result<u64>;

    /// Deallocate device memory
    fn deallocate(ptr: u64, size_bytes: usize, device: &Self::Device);

    /// Copy data from host to device (synchronous)
    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device) -> Result<()>;

    /// Copy data from device to host (synchronous)
    fn copy_from_device(src: u64, dst: &mut [u8], device: &Self::Device) -> Result<()>;

    /// Copy data within a device (synchronous)
    fn copy_within_device(
        src: u64,
        dst: u64,
        size_bytes: usize,
        device: &Self::Device,
    ) -> Result<()>;

    /// Copy a strided view into a contiguous destination buffer
    ///
    /// # Parameters
    /// - `src_handle`: Source buffer handle
    /// - `src_byte_offset`: Byte offset of the view's first element
    /// - `dst_handle`: Destination buffer handle (row-major, densely packed)
    /// - `shape`: Shape of the view
    /// - `strides`: Strides of the view (in elements, not bytes)
    /// - `elem_size`: Size of each element in bytes
    fn copy_strided(
        src_handle: u64,
        src_byte_offset: usize,
        dst_handle: u64,
        shape: &[usize],
        strides: &[isize],
        elem_size: usize,
        device: &Self::Device,
    ) -> Result<()>;

    /// Get the default device
    fn default_device() -> Self::Device;

    /// Get the default client for a device
    fn default_client(device: &Self::Device) -> Self::Client;
}

/// Kind of compute device
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DeviceKind {
    /// Host CPU
    Cpu,
    /// NVIDIA GPU
    Nvidia,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Nvidia => write!(f, "nvidia"),
        }
    }
}

/// Trait for device identification
pub trait Device: Clone + Send + Sync + fmt::Debug + 'static {
    /// Kind of device
    fn kind(&self) -> DeviceKind;

    /// Ordinal of this device among devices of the same kind
    fn id(&self) -> usize;

    /// Check if two devices are the same (same kind and id)
    fn is_same(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.id() == other.id()
    }

    /// Human-readable name
    fn name(&self) -> String {
        format!("{}:{}", self.kind(), self.id())
    }
}

/// Trait for runtime clients that handle operation dispatch
pub trait RuntimeClient<R: Runtime>: Clone + Send + Sync {
    /// Get the device this client operates on
    fn device(&self) -> &R::Device;

    /// Synchronize: wait for all pending operations to complete
    fn synchronize(&self);

    /// Get the allocator for this client
    fn allocator(&self) -> &R::Allocator;
}
