//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::fmt::Debug;

/// Trait for types that can be elements of a tensor
///
/// This trait connects Rust's type system to infercore's runtime dtype system.
/// It's implemented for the primitive numeric types and the `half` floats.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck)
/// - `PartialOrd + Debug` - Comparison and diagnostics
pub trait Element: Copy + Send + Sync + Pod + Zeroable + PartialOrd + Debug + 'static {
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Render the value for diagnostics
    ///
    /// Reduced-precision floats are widened to f32 before formatting.
    fn display(self) -> String {
        format!("{:?}", self)
    }
}

macro_rules! impl_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;
            }
        )*
    };
}

impl_element! {
    f64 => F64,
    f32 => F32,
    i64 => I64,
    i32 => I32,
    i16 => I16,
    i8 => I8,
    u64 => U64,
    u32 => U32,
    u16 => U16,
    u8 => U8,
}

impl Element for half::f16 {
    const DTYPE: DType = DType::F16;

    fn display(self) -> String {
        format!("{:?}", self.to_f32())
    }
}

impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;

    fn display(self) -> String {
        format!("{:?}", self.to_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_mapping() {
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(half::f16::DTYPE, DType::F16);
        assert_eq!(half::bf16::DTYPE, DType::BF16);
        assert_eq!(i64::DTYPE, DType::I64);
        assert_eq!(u8::DTYPE, DType::U8);
    }

    #[test]
    fn test_size_matches_dtype() {
        assert_eq!(std::mem::size_of::<half::bf16>(), DType::BF16.size_in_bytes());
        assert_eq!(std::mem::size_of::<i64>(), DType::I64.size_in_bytes());
    }

    #[test]
    fn test_display_widens_half() {
        assert_eq!(half::bf16::from_f32(1.5).display(), "1.5");
        assert_eq!(3i64.display(), "3");
    }
}
