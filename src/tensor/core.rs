//! Core Tensor type

use super::{Layout, Storage};
use crate::dispatch_dtype;
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use std::fmt;

/// N-dimensional array stored on a compute device
///
/// `Tensor` is the fundamental data structure in infercore. It consists of:
/// - **Storage**: Reference-counted device memory
/// - **Layout**: Shape, strides, and offset defining the view into storage
/// - **DType**: Element type (determined at runtime)
///
/// # Zero-Copy Views
///
/// `permute`, `slice` and `view` create new tensors that share the same
/// underlying storage. This is achieved through:
/// - Arc-wrapped storage (reference counting)
/// - Modified layout (different strides/offset)
///
/// # Example
///
/// ```ignore
/// use infercore::prelude::*;
///
/// let device = CpuDevice::new();
/// let a = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device);
/// let b = a.permute(&[1, 0])?; // Zero-copy, shares storage with a
/// ```
pub struct Tensor<R: Runtime> {
    /// Device memory
    storage: Storage<R>,
    /// Shape, strides, offset
    layout: Layout,
    /// Element type of this view
    dtype: DType,
}

impl<R: Runtime> Tensor<R> {
    /// Create a tensor from storage, dtype and layout
    ///
    /// Fails with [`Error::OutOfBounds`] if the layout addresses any byte
    /// outside the storage block.
    pub fn from_parts(storage: Storage<R>, dtype: DType, layout: Layout) -> Result<Self> {
        if layout.elem_count() > 0 {
            let elem_size = dtype.size_in_bytes();
            let (start, end) = layout
                .span()
                .map(|(lo, hi)| (lo * elem_size, hi * elem_size))
                .unwrap_or((0, usize::MAX));
            if end > storage.size_in_bytes() {
                return Err(Error::OutOfBounds {
                    start,
                    end,
                    storage_bytes: storage.size_in_bytes(),
                });
            }
        }

        Ok(Self {
            storage,
            layout,
            dtype,
        })
    }

    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal the product of the `shape` dimensions.
    /// For a fallible alternative, use [`Self::try_from_slice`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let tensor = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device);
    /// ```
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize], device: &R::Device) -> Self {
        Self::try_from_slice(data, shape, device).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    ///
    /// Returns an error if `data.len()` does not equal the product of the `shape` dimensions,
    /// or if memory allocation fails.
    pub fn try_from_slice<T: Element>(
        data: &[T],
        shape: &[usize],
        device: &R::Device,
    ) -> Result<Self> {
        if Layout::checked_elem_count(shape) != Some(data.len()) {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        let storage = Storage::from_bytes(bytemuck::cast_slice(data), device)?;

        Ok(Self {
            storage,
            layout: Layout::contiguous(shape),
            dtype: T::DTYPE,
        })
    }

    /// Allocate a tensor with canonical row-major strides
    ///
    /// The CPU backend hands out zeroed memory; other backends make no promise
    /// about the initial contents. Use [`Self::zeros`] when zeros are required.
    ///
    /// # Panics
    ///
    /// Panics if allocation fails. For a fallible alternative, use [`Self::try_empty`].
    pub fn empty(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::try_empty(shape, dtype, device).expect("Tensor::empty failed")
    }

    /// Allocate a tensor with canonical row-major strides (fallible version)
    ///
    /// Fails with [`Error::InvalidArgument`] if the byte size of `shape`
    /// overflows.
    pub fn try_empty(shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        let size_bytes = Layout::checked_elem_count(shape)
            .and_then(|len| len.checked_mul(dtype.size_in_bytes()))
            .filter(|&bytes| bytes <= isize::MAX as usize)
            .ok_or_else(|| {
                Error::invalid_argument("shape", format!("{shape:?} of {dtype} is too large"))
            })?;
        let storage = Storage::new(size_bytes, device)?;

        Ok(Self {
            storage,
            layout: Layout::contiguous(shape),
            dtype,
        })
    }

    /// Create a tensor filled with zeros
    ///
    /// # Panics
    ///
    /// Panics if allocation fails. For a fallible alternative, use [`Self::try_zeros`].
    pub fn zeros(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::try_zeros(shape, dtype, device).expect("Tensor::zeros failed")
    }

    /// Create a tensor filled with zeros (fallible version)
    ///
    /// The zero bit pattern is zero for every supported dtype, so the fill is
    /// a plain byte copy.
    pub fn try_zeros(shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        let tensor = Self::try_empty(shape, dtype, device)?;
        let zeros = vec![0u8; tensor.storage.size_in_bytes()];
        R::copy_to_device(&zeros, tensor.storage.ptr(), device)?;
        Ok(tensor)
    }

    // ===== Accessors =====

    /// Get the underlying storage
    #[inline]
    pub fn storage(&self) -> &Storage<R> {
        &self.storage
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the strides (in elements)
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Get the offset into storage (in elements)
    #[inline]
    pub fn offset(&self) -> usize {
        self.layout.offset()
    }

    /// Get the offset into storage (in bytes)
    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.layout.offset() * self.dtype.size_in_bytes()
    }

    /// Device handle of the first viewed element
    #[inline]
    pub fn data_ptr(&self) -> u64 {
        self.storage.ptr() + self.byte_offset() as u64
    }

    /// Get number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Get total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Size of one element in bytes
    #[inline]
    pub fn element_size(&self) -> usize {
        self.dtype.size_in_bytes()
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.storage.device()
    }

    /// Check if tensor is contiguous in memory
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Check if this is a scalar (0-dimensional tensor)
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.layout.is_scalar()
    }

    // ===== View Operations (Zero-Copy) =====

    /// Permute dimensions (zero-copy)
    ///
    /// Reorders the dimensions of the tensor according to the given permutation.
    /// `order` must contain every axis in `0..ndim` exactly once.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let tensor = Tensor::<CpuRuntime>::from_slice(&data, &[2, 3, 4], &device);
    /// let permuted = tensor.permute(&[2, 0, 1])?; // Shape becomes [4, 2, 3]
    /// ```
    pub fn permute(&self, order: &[usize]) -> Result<Self> {
        let layout = self
            .layout
            .permute(order)
            .ok_or_else(|| Error::InvalidPermutation {
                order: order.to_vec(),
                ndim: self.ndim(),
            })?;

        Ok(self.with_layout(layout))
    }

    /// Restrict one dimension to `[start, end)` (zero-copy)
    ///
    /// # Example
    ///
    /// ```ignore
    /// let tensor = Tensor::<CpuRuntime>::from_slice(&data, &[4, 5, 6], &device);
    /// let sliced = tensor.slice(1, 1, 4)?; // Shape becomes [4, 3, 6]
    /// ```
    pub fn slice(&self, dim: usize, start: usize, end: usize) -> Result<Self> {
        if dim >= self.ndim() {
            return Err(Error::InvalidDimension {
                dim,
                ndim: self.ndim(),
            });
        }

        let invalid = || Error::InvalidSlice {
            dim,
            start,
            end,
            size: self.shape()[dim],
        };
        let layout = self.layout.slice(dim, start, end).ok_or_else(invalid)?;

        Ok(self.with_layout(layout))
    }

    /// Reinterpret the data with a new shape (zero-copy)
    ///
    /// The element count must match and the tensor must be contiguous; use
    /// [`Self::reshape`] to fall back to a copy for strided tensors.
    pub fn view(&self, shape: &[usize]) -> Result<Self> {
        if Layout::checked_elem_count(shape) != Some(self.numel()) {
            return Err(Error::shape_mismatch(self.shape(), shape));
        }
        let layout = self
            .layout
            .reshape(shape)
            .ok_or_else(|| Error::not_contiguous("view", "self"))?;

        Ok(self.with_layout(layout))
    }

    /// Reshape the tensor
    ///
    /// Zero-copy when the tensor is contiguous; otherwise the data is first
    /// materialized into fresh row-major storage.
    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        if Layout::checked_elem_count(shape) != Some(self.numel()) {
            return Err(Error::shape_mismatch(self.shape(), shape));
        }
        if self.is_contiguous() {
            self.view(shape)
        } else {
            self.contiguous()?.view(shape)
        }
    }

    /// Share this tensor's storage under a different layout
    fn with_layout(&self, layout: Layout) -> Self {
        Self {
            storage: self.storage.clone(),
            layout,
            dtype: self.dtype,
        }
    }

    // ===== Copies =====

    /// Make tensor contiguous
    ///
    /// If the tensor is already contiguous, returns a view (zero-copy).
    /// Otherwise, allocates new storage and copies the data to a contiguous layout
    /// using `Runtime::copy_strided`.
    pub fn contiguous(&self) -> Result<Self> {
        if self.is_contiguous() {
            return Ok(self.clone());
        }

        let device = self.storage.device();
        let fresh = Self::try_empty(self.shape(), self.dtype, device)?;
        R::copy_strided(
            self.storage.ptr(),
            self.byte_offset(),
            fresh.storage.ptr(),
            self.shape(),
            self.strides(),
            self.element_size(),
            device,
        )?;
        Ok(fresh)
    }

    /// Copy the logical contents into fresh contiguous storage on `device`
    ///
    /// The result never aliases `self`, even when `device` is the tensor's
    /// own device.
    pub fn to_device(&self, device: &R::Device) -> Result<Self> {
        let bytes = self.to_bytes()?;
        let storage = Storage::from_bytes(&bytes, device)?;

        Ok(Self {
            storage,
            layout: Layout::contiguous(self.shape()),
            dtype: self.dtype,
        })
    }

    // ===== Data Access =====

    /// Fill the tensor from a raw host buffer
    ///
    /// Copies exactly `numel * element_size` bytes into storage at the
    /// tensor's offset. Every view sharing the storage observes the write.
    pub fn load(&self, bytes: &[u8]) -> Result<()> {
        let expected = self.numel() * self.element_size();
        if bytes.len() != expected {
            return Err(Error::ByteLengthMismatch {
                expected,
                got: bytes.len(),
            });
        }
        if !self.is_contiguous() {
            return Err(Error::not_contiguous("load", "self"));
        }
        if expected == 0 {
            return Ok(());
        }

        R::copy_to_device(bytes, self.data_ptr(), self.device())
    }

    /// Fill the tensor from typed host data
    pub fn load_slice<T: Element>(&self, data: &[T]) -> Result<()> {
        if T::DTYPE != self.dtype {
            return Err(Error::DTypeMismatch {
                lhs: self.dtype,
                rhs: T::DTYPE,
            });
        }
        self.load(bytemuck::cast_slice(data))
    }

    /// Copy the logical contents to host bytes in row-major order
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let source = self.contiguous()?;
        let mut bytes = vec![0u8; source.numel() * source.element_size()];
        if !bytes.is_empty() {
            R::copy_from_device(source.data_ptr(), &mut bytes, source.device())?;
        }
        Ok(bytes)
    }

    /// Copy tensor data to a Vec on the host
    ///
    /// # Panics
    ///
    /// Panics if `T` does not match the tensor's dtype or the device copy
    /// fails. For a fallible alternative, use [`Self::try_to_vec`].
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        self.try_to_vec().expect("Tensor::to_vec failed")
    }

    /// Copy tensor data to a Vec on the host (fallible version)
    ///
    /// Strided tensors are materialized in row-major order first.
    pub fn try_to_vec<T: Element>(&self) -> Result<Vec<T>> {
        if T::DTYPE != self.dtype {
            return Err(Error::DTypeMismatch {
                lhs: self.dtype,
                rhs: T::DTYPE,
            });
        }

        let source = self.contiguous()?;
        // Allocate with T's alignment, then view as bytes for the copy.
        let mut result = vec![T::zeroed(); source.numel()];
        if !result.is_empty() {
            let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut result);
            R::copy_from_device(source.data_ptr(), bytes, source.device())?;
        }
        Ok(result)
    }

    /// Extract the scalar value from a single-element tensor
    pub fn item<T: Element>(&self) -> Result<T> {
        if self.numel() != 1 {
            return Err(Error::shape_mismatch(&[1], self.shape()));
        }
        let values = self.try_to_vec::<T>()?;
        Ok(values[0])
    }

    /// Render the summary line followed by the data, one row per line
    ///
    /// Rows run along the last dimension. Reduced-precision floats are
    /// widened to f32 before formatting; booleans print as `true`/`false`.
    pub fn debug_string(&self) -> Result<String> {
        let row_len = self.shape().last().copied().unwrap_or(1).max(1);

        let cells: Vec<String> = if self.dtype == DType::Bool {
            self.to_bytes()?
                .into_iter()
                .map(|b| (b != 0).to_string())
                .collect()
        } else {
            dispatch_dtype!(self.dtype, T => {
                let values = self.try_to_vec::<T>()?;
                Ok(values.into_iter().map(Element::display).collect::<Vec<String>>())
            }, "debug_string")?
        };

        let mut out = self.to_string();
        for row in cells.chunks(row_len) {
            out.push_str(&format!("\n[{}]", row.join(", ")));
        }
        Ok(out)
    }
}

impl<R: Runtime> Clone for Tensor<R> {
    /// Clone creates a new tensor sharing the same storage (zero-copy)
    fn clone(&self) -> Self {
        self.with_layout(self.layout.clone())
    }
}

impl<R: Runtime> fmt::Debug for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("strides", &self.strides())
            .field("offset", &self.offset())
            .field("dtype", &self.dtype)
            .field("contiguous", &self.is_contiguous())
            .finish()
    }
}

impl<R: Runtime> fmt::Display for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tensor(shape={:?}, strides={:?}, dtype={})",
            self.shape(),
            self.strides(),
            self.dtype
        )
    }
}
