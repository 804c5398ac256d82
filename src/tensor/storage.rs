//! Storage: device memory management with Arc-based sharing

use crate::error::Result;
use crate::runtime::Runtime;
use std::sync::Arc;

/// Storage for tensor data on a device
///
/// Storage wraps one block of device memory with reference counting, enabling
/// zero-copy views (permute, slice, view) that share the underlying buffer.
/// It is untyped: the dtype lives on each tensor view.
///
/// Memory is deallocated when the last reference is dropped.
pub struct Storage<R: Runtime> {
    inner: Arc<StorageInner<R>>,
}

struct StorageInner<R: Runtime> {
    /// Raw device pointer (GPU address or CPU ptr cast to u64)
    ptr: u64,
    /// Size of the block in bytes
    size_bytes: usize,
    /// Device where memory is allocated
    device: R::Device,
    /// If true, we own this memory and should deallocate on drop
    owned: bool,
}

impl<R: Runtime> Storage<R> {
    /// Create new storage with allocated memory
    ///
    /// Allocates `size_bytes` bytes on the specified device.
    pub fn new(size_bytes: usize, device: &R::Device) -> Result<Self> {
        let ptr = R::allocate(size_bytes, device)?;

        Ok(Self {
            inner: Arc::new(StorageInner {
                ptr,
                size_bytes,
                device: device.clone(),
                owned: true,
            }),
        })
    }

    /// Create storage holding a copy of raw bytes
    pub fn from_bytes(data: &[u8], device: &R::Device) -> Result<Self> {
        let storage = Self::new(data.len(), device)?;
        R::copy_to_device(data, storage.ptr(), device)?;
        Ok(storage)
    }

    /// Wrap existing device memory without taking ownership
    ///
    /// # Safety
    /// - `ptr` must point to `size_bytes` bytes of valid device memory
    /// - The memory must remain valid for the lifetime of this Storage
    /// - Caller is responsible for eventual deallocation
    pub unsafe fn from_ptr(ptr: u64, size_bytes: usize, device: &R::Device) -> Self {
        Self {
            inner: Arc::new(StorageInner {
                ptr,
                size_bytes,
                device: device.clone(),
                owned: false,
            }),
        }
    }

    /// Get the raw device pointer
    #[inline]
    pub fn ptr(&self) -> u64 {
        self.inner.ptr
    }

    /// Get size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.inner.size_bytes
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.size_bytes == 0
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.inner.device
    }

    /// Whether this storage frees its block on drop
    #[inline]
    pub fn is_owned(&self) -> bool {
        self.inner.owned
    }

    /// Get the reference count
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if this is the only reference
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }

    /// Check whether two handles share one memory block
    #[inline]
    pub fn same_block(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<R: Runtime> Clone for Storage<R> {
    /// Clone increments the reference count (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Runtime> Drop for StorageInner<R> {
    fn drop(&mut self) {
        if self.owned && self.ptr != 0 {
            R::deallocate(self.ptr, self.size_bytes, &self.device);
        }
    }
}

impl<R: Runtime> std::fmt::Debug for Storage<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("ptr", &format!("0x{:x}", self.inner.ptr))
            .field("size_bytes", &self.inner.size_bytes)
            .field("owned", &self.inner.owned)
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}

#[cfg(all(test, feature = "cpu"))]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_clone_shares_block() {
        let device = CpuDevice::new();
        let storage = Storage::<CpuRuntime>::new(16, &device).unwrap();
        assert!(storage.is_unique());

        let view = storage.clone();
        assert_eq!(storage.ref_count(), 2);
        assert!(storage.same_block(&view));
        assert_eq!(view.ptr(), storage.ptr());

        drop(view);
        assert!(storage.is_unique());
    }

    #[test]
    fn test_from_bytes_copies() {
        let device = CpuDevice::new();
        let storage = Storage::<CpuRuntime>::from_bytes(&[1, 2, 3, 4], &device).unwrap();
        assert_eq!(storage.size_in_bytes(), 4);

        let mut host = [0u8; 4];
        CpuRuntime::copy_from_device(storage.ptr(), &mut host, &device).unwrap();
        assert_eq!(host, [1, 2, 3, 4]);
    }

    #[test]
    fn test_borrowed_storage_is_not_freed() {
        let device = CpuDevice::new();
        let mut block = [5u8; 8];
        let storage = unsafe {
            Storage::<CpuRuntime>::from_ptr(block.as_mut_ptr() as u64, block.len(), &device)
        };
        assert!(!storage.is_owned());
        drop(storage);
        assert_eq!(block, [5u8; 8]);
    }
}
