//! CPU runtime implementation

use super::client::CpuClient;
use super::device::CpuDevice;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use std::alloc::{Layout as AllocLayout, alloc_zeroed, dealloc};
use tracing::{debug, trace};

/// Alignment of every host block (AVX-512 register width)
const ALIGN: usize = 64;

/// CPU compute runtime
///
/// Memory is allocated on the heap using the system allocator. Every copy
/// completes before the call returns.
#[derive(Clone, Debug, Default)]
pub struct CpuRuntime;

impl Runtime for CpuRuntime {
    type Device = CpuDevice;
    type Client = CpuClient;
    type Allocator = super::client::CpuAllocator;

    fn name() -> &'static str {
        "cpu"
    }

    fn allocate(size_bytes: usize, _device: &Self::Device) -> Result<u64> {
        if size_bytes == 0 {
            return Ok(0);
        }

        let layout = AllocLayout::from_size_align(size_bytes, ALIGN)
            .map_err(|e| Error::Backend(format!("invalid allocation layout: {e}")))?;

        let ptr = unsafe { alloc_zeroed(layout) };
        if ptr.is_null() {
            return Err(Error::OutOfMemory { size: size_bytes });
        }

        debug!(size_bytes, "cpu allocate");
        Ok(ptr as u64)
    }

    fn deallocate(ptr: u64, size_bytes: usize, _device: &Self::Device) {
        if ptr == 0 || size_bytes == 0 {
            return;
        }

        // The layout was valid when the block was allocated.
        if let Ok(layout) = AllocLayout::from_size_align(size_bytes, ALIGN) {
            debug!(size_bytes, "cpu deallocate");
            unsafe {
                dealloc(ptr as *mut u8, layout);
            }
        }
    }

    fn copy_to_device(src: &[u8], dst: u64, _device: &Self::Device) -> Result<()> {
        if src.is_empty() {
            return Ok(());
        }
        if dst == 0 {
            return Err(Error::Backend("copy_to_device: null destination".into()));
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), dst as *mut u8, src.len());
        }
        Ok(())
    }

    fn copy_from_device(src: u64, dst: &mut [u8], _device: &Self::Device) -> Result<()> {
        if dst.is_empty() {
            return Ok(());
        }
        if src == 0 {
            return Err(Error::Backend("copy_from_device: null source".into()));
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src as *const u8, dst.as_mut_ptr(), dst.len());
        }
        Ok(())
    }

    fn copy_within_device(
        src: u64,
        dst: u64,
        size_bytes: usize,
        _device: &Self::Device,
    ) -> Result<()> {
        if size_bytes == 0 {
            return Ok(());
        }
        if src == 0 || dst == 0 {
            return Err(Error::Backend("copy_within_device: null handle".into()));
        }

        unsafe {
            // Use copy (not copy_nonoverlapping) in case src and dst overlap
            std::ptr::copy(src as *const u8, dst as *mut u8, size_bytes);
        }
        Ok(())
    }

    fn copy_strided(
        src_handle: u64,
        src_byte_offset: usize,
        dst_handle: u64,
        shape: &[usize],
        strides: &[isize],
        elem_size: usize,
        _device: &Self::Device,
    ) -> Result<()> {
        let numel: usize = shape.iter().product();
        if numel == 0 || elem_size == 0 {
            return Ok(());
        }
        if src_handle == 0 || dst_handle == 0 {
            return Err(Error::Backend("copy_strided: null handle".into()));
        }

        trace!(?shape, ?strides, elem_size, "cpu strided copy");

        let src_base = (src_handle as usize + src_byte_offset) as *const u8;
        let dst_base = dst_handle as *mut u8;

        // Iterate over all elements in row-major order
        let mut indices = vec![0usize; shape.len()];

        for dst_offset in 0..numel {
            let src_elem_offset: isize = indices
                .iter()
                .zip(strides)
                .map(|(&idx, &stride)| idx as isize * stride)
                .sum();

            unsafe {
                std::ptr::copy_nonoverlapping(
                    src_base.offset(src_elem_offset * elem_size as isize),
                    dst_base.add(dst_offset * elem_size),
                    elem_size,
                );
            }

            for dim in (0..shape.len()).rev() {
                indices[dim] += 1;
                if indices[dim] < shape[dim] {
                    break;
                }
                indices[dim] = 0;
            }
        }
        Ok(())
    }

    fn default_device() -> Self::Device {
        CpuDevice::new()
    }

    fn default_client(device: &Self::Device) -> Self::Client {
        CpuClient::new(device.clone())
    }
}
