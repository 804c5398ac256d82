//! Data type system for infercore tensors
//!
//! This module provides the `DType` enum tagging the element type of a tensor,
//! the `Element` trait connecting Rust types to tags, and the `FloatElement`
//! trait that defines mixed-precision widening and narrowing for kernels.

mod element;
mod precision;

pub use element::Element;
pub use precision::FloatElement;

use std::fmt;

// ============================================================================
// DType Enum
// ============================================================================

/// Data types supported by infercore tensors
///
/// Kernels reinterpret raw byte buffers according to this tag. Floating point
/// kernels are implemented for `F32`, `F16` and `BF16`; index and position
/// operands are always `I64`.
///
/// # Discriminant Values (Serialization Stability)
///
/// - Floats: 0-9 (F64=0, F32=1, F16=2, BF16=3)
/// - Signed ints: 10-19 (I64=10, I32=11, I16=12, I8=13)
/// - Unsigned ints: 20-29 (U64=20, U32=21, U16=22, U8=23)
/// - Bool: 30
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    // Floating point types (0-9)
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point (most common)
    F32 = 1,
    /// 16-bit floating point (IEEE 754)
    F16 = 2,
    /// 16-bit brain floating point
    BF16 = 3,

    // Integer types
    /// 64-bit signed integer
    I64 = 10,
    /// 32-bit signed integer
    I32 = 11,
    /// 16-bit signed integer
    I16 = 12,
    /// 8-bit signed integer
    I8 = 13,

    // Unsigned integer types
    /// 64-bit unsigned integer
    U64 = 20,
    /// 32-bit unsigned integer
    U32 = 21,
    /// 16-bit unsigned integer
    U16 = 22,
    /// 8-bit unsigned integer
    U8 = 23,

    /// Boolean type (one byte per element)
    Bool = 30,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::F64 | Self::I64 | Self::U64 => 8,
            Self::F32 | Self::I32 | Self::U32 => 4,
            Self::F16 | Self::BF16 | Self::I16 | Self::U16 => 2,
            Self::I8 | Self::U8 | Self::Bool => 1,
        }
    }

    /// Get the dtype used for index and position operands
    #[inline]
    pub const fn index() -> Self {
        Self::I64
    }

    /// Short name for display (e.g., "f32", "i64")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::F16 => "f16",
            Self::BF16 => "bf16",
            Self::I64 => "i64",
            Self::I32 => "i32",
            Self::I16 => "i16",
            Self::I8 => "i8",
            Self::U64 => "u64",
            Self::U32 => "u32",
            Self::U16 => "u16",
            Self::U8 => "u8",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Set of dtypes for efficient membership testing
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DTypeSet {
    bits: u64,
}

impl DTypeSet {
    /// Floating point types with kernel implementations
    pub const KERNEL_FLOATS: Self = Self {
        bits: (1 << DType::F32 as u8) | (1 << DType::F16 as u8) | (1 << DType::BF16 as u8),
    };

    /// Check if the set contains a dtype
    #[inline]
    pub const fn contains(self, dtype: DType) -> bool {
        self.bits & (1 << dtype as u8) != 0
    }
}
