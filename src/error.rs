//! Error types for infercore

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using infercore's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in infercore operations
///
/// Every contract violation is reported before any kernel touches its output,
/// so an `Err` always means the output tensors are unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Operand has the wrong number of dimensions
    #[error("{op}: '{arg}' must be a {expected}D tensor, got {got}D")]
    RankMismatch {
        /// The operation name
        op: &'static str,
        /// The operand name
        arg: &'static str,
        /// Required rank
        expected: usize,
        /// Actual rank
        got: usize,
    },

    /// Invalid dimension index
    #[error("Invalid dimension {dim} for tensor with {ndim} dimensions")]
    InvalidDimension {
        /// The invalid dimension
        dim: usize,
        /// Number of dimensions
        ndim: usize,
    },

    /// Permutation order is not a permutation of `0..ndim`
    #[error("Invalid permutation {order:?} for tensor with {ndim} dimensions")]
    InvalidPermutation {
        /// The requested order
        order: Vec<usize>,
        /// Number of dimensions
        ndim: usize,
    },

    /// Slice range is empty or exceeds the dimension
    #[error("Invalid slice [{start}, {end}) on dimension {dim} of size {size}")]
    InvalidSlice {
        /// Sliced dimension
        dim: usize,
        /// Range start (inclusive)
        start: usize,
        /// Range end (exclusive)
        end: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Left-hand side dtype
        lhs: DType,
        /// Right-hand side dtype
        rhs: DType,
    },

    /// Device mismatch between operands
    #[error("Device mismatch: tensors must be on the same device")]
    DeviceMismatch,

    /// Device kind has no kernel implementation
    #[error("Unsupported device '{device}' for operation '{op}'")]
    UnsupportedDevice {
        /// Device description
        device: String,
        /// The operation name
        op: &'static str,
    },

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: i64,
        /// Size of the dimension
        size: usize,
    },

    /// A view addresses bytes outside its storage
    #[error("View spans bytes [{start}, {end}) but storage holds {storage_bytes} bytes")]
    OutOfBounds {
        /// First addressed byte
        start: usize,
        /// One past the last addressed byte
        end: usize,
        /// Size of the storage in bytes
        storage_bytes: usize,
    },

    /// Raw buffer length does not match the tensor's byte size
    #[error("Byte length mismatch: expected {expected} bytes, got {got}")]
    ByteLengthMismatch {
        /// Expected byte count
        expected: usize,
        /// Provided byte count
        got: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Tensor is not contiguous when contiguous memory is required
    #[error("{op}: '{arg}' must be contiguous")]
    NotContiguous {
        /// The operation name
        op: &'static str,
        /// The operand name
        arg: &'static str,
    },

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a rank mismatch error
    pub fn rank_mismatch(op: &'static str, arg: &'static str, expected: usize, got: usize) -> Self {
        Self::RankMismatch {
            op,
            arg,
            expected,
            got,
        }
    }

    /// Create a not-contiguous error
    pub fn not_contiguous(op: &'static str, arg: &'static str) -> Self {
        Self::NotContiguous { op, arg }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_contract() {
        let err = Error::rank_mismatch("rope", "pos_ids", 1, 2);
        assert_eq!(err.to_string(), "rope: 'pos_ids' must be a 1D tensor, got 2D");

        let err = Error::not_contiguous("linear", "weight");
        assert_eq!(err.to_string(), "linear: 'weight' must be contiguous");

        let err = Error::unsupported_dtype(DType::I32, "swiglu");
        assert!(err.to_string().contains("swiglu"));
    }
}
