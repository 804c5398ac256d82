//! CPU runtime implementation
//!
//! The CPU runtime uses standard heap allocation and provides the reference
//! implementation for every operation. Kernels run synchronously on the
//! calling thread.

mod client;
mod device;
pub(crate) mod kernels;
mod runtime;

pub use client::{CpuAllocator, CpuClient};
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
