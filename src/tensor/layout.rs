//! Layout: shape, strides, and offset for tensor memory layout

use smallvec::SmallVec;
use std::fmt;

/// Stack allocation threshold for dimensions
/// Most tensors have 4 or fewer dimensions, so we stack-allocate up to 4
const STACK_DIMS: usize = 4;

/// Shape type: dimensions of a tensor
pub type Shape = SmallVec<[usize; STACK_DIMS]>;

/// Strides type: element offsets between consecutive elements along each dimension
/// NOTE: Strides are in ELEMENTS, not bytes
pub type Strides = SmallVec<[isize; STACK_DIMS]>;

/// Layout describes the memory layout of a tensor
///
/// A tensor's elements live in a shared buffer, not necessarily in row-major
/// order. The layout specifies how to compute the address of any element:
///
/// ```text
/// offset + i0 * strides[0] + i1 * strides[1] + ... + in * strides[n]
/// ```
///
/// All quantities are in elements; callers scale by the element size.
#[derive(Clone, PartialEq, Eq)]
pub struct Layout {
    /// Shape: size along each dimension
    shape: Shape,
    /// Strides: offset (in elements) between consecutive elements along each dimension
    strides: Strides,
    /// Offset: starting element index in the underlying storage
    offset: usize,
}

impl Layout {
    /// Create a new contiguous (row-major/C-order) layout from a shape
    ///
    /// # Example
    /// ```
    /// use infercore::tensor::Layout;
    /// let layout = Layout::contiguous(&[2, 3, 4]);
    /// assert_eq!(layout.shape(), &[2, 3, 4]);
    /// assert_eq!(layout.strides(), &[12, 4, 1]);
    /// ```
    pub fn contiguous(shape: &[usize]) -> Self {
        Self::contiguous_at(shape, 0)
    }

    /// Create a contiguous layout starting at an element offset
    pub fn contiguous_at(shape: &[usize], offset: usize) -> Self {
        let shape: Shape = shape.iter().copied().collect();
        let strides = Self::compute_contiguous_strides(&shape);
        Self {
            shape,
            strides,
            offset,
        }
    }

    /// Create a layout with explicit shape, strides, and offset
    pub fn new(shape: Shape, strides: Strides, offset: usize) -> Self {
        debug_assert_eq!(shape.len(), strides.len());
        Self {
            shape,
            strides,
            offset,
        }
    }

    /// Create a scalar (0-dimensional) layout
    pub fn scalar() -> Self {
        Self {
            shape: SmallVec::new(),
            strides: SmallVec::new(),
            offset: 0,
        }
    }

    /// Number of elements in `shape`, if it is addressable
    ///
    /// Returns None when the product overflows or exceeds `isize::MAX`, the
    /// largest element count signed strides can span.
    pub fn checked_elem_count(shape: &[usize]) -> Option<usize> {
        if shape.contains(&0) {
            return Some(0);
        }
        shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .filter(|&count| count <= isize::MAX as usize)
    }

    /// Compute contiguous strides for a given shape (row-major order)
    ///
    /// Products saturate; shapes rejected by [`Self::checked_elem_count`]
    /// never reach a tensor.
    fn compute_contiguous_strides(shape: &[usize]) -> Strides {
        let mut strides: Strides = SmallVec::with_capacity(shape.len());
        let mut stride = 1isize;

        // Compute strides from last dimension to first
        for &dim in shape.iter().rev() {
            strides.push(stride);
            stride = stride.saturating_mul(dim_isize(dim));
        }

        strides.reverse();
        strides
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Get the offset (in elements)
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        if self.shape.contains(&0) {
            return 0;
        }
        self.shape.iter().fold(1, |acc: usize, &dim| acc.saturating_mul(dim))
    }

    /// Check if the tensor is a scalar (0 dimensions)
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// Check if memory is contiguous (row-major order)
    ///
    /// Scanning from the last dimension to the first, each stride must equal
    /// the product of all sizes to its right. Scalars and single-element
    /// layouts are trivially contiguous. The offset plays no part: a slice
    /// along the outermost dimension of a contiguous layout stays contiguous.
    pub fn is_contiguous(&self) -> bool {
        if self.is_scalar() || self.elem_count() == 1 {
            return true;
        }

        let mut expected = 1isize;
        for (&dim, &stride) in self.shape.iter().zip(self.strides.iter()).rev() {
            if stride != expected {
                return false;
            }
            expected = expected.saturating_mul(dim_isize(dim));
        }
        true
    }

    /// Compute the linear index (element offset) for given indices
    pub fn index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.ndim() {
            return None;
        }

        // Check bounds
        for (idx, &dim) in indices.iter().zip(self.shape.iter()) {
            if *idx >= dim {
                return None;
            }
        }

        let mut linear = isize::try_from(self.offset).ok()?;
        for (&idx, &stride) in indices.iter().zip(self.strides.iter()) {
            linear = linear.checked_add(isize::try_from(idx).ok()?.checked_mul(stride)?)?;
        }

        usize::try_from(linear).ok()
    }

    /// Range of element positions addressed by this layout
    ///
    /// Returns `None` for empty layouts (some dimension of size 0), for
    /// layouts that would address a position below zero, and when the
    /// reachable range does not fit in `isize`.
    pub fn span(&self) -> Option<(usize, usize)> {
        if self.elem_count() == 0 {
            return None;
        }

        let mut lo = isize::try_from(self.offset).ok()?;
        let mut hi = lo;
        for (&dim, &stride) in self.shape.iter().zip(self.strides.iter()) {
            let extent = isize::try_from(dim - 1).ok()?.checked_mul(stride)?;
            if extent < 0 {
                lo = lo.checked_add(extent)?;
            } else {
                hi = hi.checked_add(extent)?;
            }
        }

        let lo = usize::try_from(lo).ok()?;
        let hi = usize::try_from(hi).ok()?;
        Some((lo, hi + 1))
    }

    /// Create a permuted layout
    ///
    /// Returns None unless `order` is a permutation of `0..ndim`.
    pub fn permute(&self, order: &[usize]) -> Option<Self> {
        if order.len() != self.ndim() {
            return None;
        }

        let mut seen: SmallVec<[bool; STACK_DIMS]> = SmallVec::from_elem(false, self.ndim());
        for &axis in order {
            if axis >= self.ndim() || seen[axis] {
                return None;
            }
            seen[axis] = true;
        }

        let shape = order.iter().map(|&axis| self.shape[axis]).collect();
        let strides = order.iter().map(|&axis| self.strides[axis]).collect();

        Some(Self::new(shape, strides, self.offset))
    }

    /// Create a layout restricted to `[start, end)` along `dim`
    ///
    /// Returns None unless `dim < ndim` and `start < end <= shape[dim]`.
    pub fn slice(&self, dim: usize, start: usize, end: usize) -> Option<Self> {
        if dim >= self.ndim() || start >= end || end > self.shape[dim] {
            return None;
        }

        let mut shape = self.shape.clone();
        shape[dim] = end - start;
        let shift = isize::try_from(start).ok()?.checked_mul(self.strides[dim])?;
        let offset = isize::try_from(self.offset).ok()?.checked_add(shift)?;

        Some(Self::new(
            shape,
            self.strides.clone(),
            usize::try_from(offset).ok()?,
        ))
    }

    /// Create a reshaped layout over the same offset (if contiguous)
    ///
    /// Returns None if the layout is not contiguous or element counts differ.
    pub fn reshape(&self, new_shape: &[usize]) -> Option<Self> {
        if !self.is_contiguous() {
            return None;
        }

        if Self::checked_elem_count(new_shape) != Some(self.elem_count()) {
            return None;
        }

        Some(Self::contiguous_at(new_shape, self.offset))
    }
}

/// A dimension size as a stride factor, saturating at `isize::MAX`
#[inline]
fn dim_isize(dim: usize) -> isize {
    isize::try_from(dim).unwrap_or(isize::MAX)
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout {{ shape: {:?}, strides: {:?}, offset: {} }}",
            self.shape.as_slice(),
            self.strides.as_slice(),
            self.offset
        )
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.shape.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_layout() {
        let layout = Layout::contiguous(&[2, 3, 4]);
        assert_eq!(layout.shape(), &[2, 3, 4]);
        assert_eq!(layout.strides(), &[12, 4, 1]);
        assert_eq!(layout.elem_count(), 24);
        assert!(layout.is_contiguous());
    }

    #[test]
    fn test_scalar_layout() {
        let layout = Layout::scalar();
        assert!(layout.is_scalar());
        assert_eq!(layout.elem_count(), 1);
        assert!(layout.is_contiguous());
        assert_eq!(layout.span(), Some((0, 1)));
    }

    #[test]
    fn test_single_element_is_contiguous_regardless_of_strides() {
        let layout = Layout::new(Shape::from_slice(&[1, 1]), Strides::from_slice(&[7, 3]), 5);
        assert!(layout.is_contiguous());
    }

    #[test]
    fn test_permute() {
        let layout = Layout::contiguous(&[2, 3, 4]);
        let permuted = layout.permute(&[2, 0, 1]).unwrap();
        assert_eq!(permuted.shape(), &[4, 2, 3]);
        assert_eq!(permuted.strides(), &[1, 12, 4]);
        assert!(!permuted.is_contiguous());

        let identity = layout.permute(&[0, 1, 2]).unwrap();
        assert!(identity.is_contiguous());
    }

    #[test]
    fn test_permute_rejects_non_permutations() {
        let layout = Layout::contiguous(&[2, 3]);
        assert!(layout.permute(&[0]).is_none());
        assert!(layout.permute(&[0, 0]).is_none());
        assert!(layout.permute(&[0, 2]).is_none());
    }

    #[test]
    fn test_slice_outer_dim_stays_contiguous() {
        let layout = Layout::contiguous(&[4, 3]);
        let sliced = layout.slice(0, 1, 3).unwrap();
        assert_eq!(sliced.shape(), &[2, 3]);
        assert_eq!(sliced.offset(), 3);
        assert!(sliced.is_contiguous());
    }

    #[test]
    fn test_slice_inner_dim() {
        let layout = Layout::contiguous(&[4, 3]);
        let sliced = layout.slice(1, 1, 2).unwrap();
        assert_eq!(sliced.shape(), &[4, 1]);
        assert_eq!(sliced.strides(), &[3, 1]);
        assert_eq!(sliced.offset(), 1);
        assert!(!sliced.is_contiguous());
        assert_eq!(sliced.index(&[2, 0]), Some(7));
    }

    #[test]
    fn test_slice_rejects_bad_ranges() {
        let layout = Layout::contiguous(&[4, 3]);
        assert!(layout.slice(2, 0, 1).is_none());
        assert!(layout.slice(0, 2, 2).is_none());
        assert!(layout.slice(0, 3, 1).is_none());
        assert!(layout.slice(1, 0, 4).is_none());
    }

    #[test]
    fn test_reshape() {
        let layout = Layout::contiguous(&[2, 3, 4]);
        let reshaped = layout.reshape(&[6, 4]).unwrap();
        assert_eq!(reshaped.shape(), &[6, 4]);
        assert!(reshaped.is_contiguous());
        assert!(layout.reshape(&[5, 5]).is_none());
        assert!(layout.permute(&[1, 0, 2]).unwrap().reshape(&[24]).is_none());
    }

    #[test]
    fn test_span() {
        let layout = Layout::contiguous(&[2, 3]);
        assert_eq!(layout.span(), Some((0, 6)));

        let sliced = layout.slice(1, 1, 3).unwrap();
        assert_eq!(sliced.span(), Some((1, 6)));

        let empty = Layout::contiguous(&[0, 3]);
        assert_eq!(empty.span(), None);
    }

    #[test]
    fn test_checked_elem_count() {
        assert_eq!(Layout::checked_elem_count(&[2, 3, 4]), Some(24));
        assert_eq!(Layout::checked_elem_count(&[]), Some(1));
        assert_eq!(Layout::checked_elem_count(&[usize::MAX, 0]), Some(0));
        assert_eq!(Layout::checked_elem_count(&[usize::MAX, 2]), None);
        assert_eq!(Layout::checked_elem_count(&[isize::MAX as usize + 1]), None);
    }

    #[test]
    fn test_huge_shapes_do_not_overflow() {
        let layout = Layout::contiguous(&[usize::MAX, 2]);
        assert_eq!(layout.strides(), &[2, 1]);
        assert_eq!(layout.elem_count(), usize::MAX);
        assert_eq!(layout.span(), None);
        assert!(Layout::contiguous(&[2]).reshape(&[usize::MAX, 2]).is_none());

        let wide = Layout::new(Shape::from_slice(&[3]), Strides::from_slice(&[isize::MAX]), 0);
        assert_eq!(wide.span(), None);
        assert_eq!(wide.index(&[2]), None);
    }

    #[test]
    fn test_index() {
        let layout = Layout::contiguous(&[2, 3]);
        assert_eq!(layout.index(&[0, 0]), Some(0));
        assert_eq!(layout.index(&[0, 2]), Some(2));
        assert_eq!(layout.index(&[1, 0]), Some(3));
        assert_eq!(layout.index(&[1, 2]), Some(5));
        assert_eq!(layout.index(&[2, 0]), None); // Out of bounds
    }
}
