//! Mixed-precision conversion for floating point kernels
//!
//! Every kernel widens its operands to f32, computes and accumulates in f32,
//! and narrows only when storing the result. The rounding behaviour of that
//! narrowing is defined here and nowhere else.

use super::Element;

/// Floating point element type with a kernel implementation.
///
/// Implemented for `f32`, `half::f16` and `half::bf16`.
pub trait FloatElement: Element {
    /// Widen to f32 (exact for every implementor)
    fn widen(self) -> f32;

    /// Narrow from f32, rounding to nearest-even
    fn narrow(v: f32) -> Self;
}

impl FloatElement for f32 {
    #[inline]
    fn widen(self) -> f32 {
        self
    }

    #[inline]
    fn narrow(v: f32) -> Self {
        v
    }
}

impl FloatElement for half::f16 {
    #[inline]
    fn widen(self) -> f32 {
        self.to_f32()
    }

    #[inline]
    fn narrow(v: f32) -> Self {
        half::f16::from_f32(v)
    }
}

impl FloatElement for half::bf16 {
    #[inline]
    fn widen(self) -> f32 {
        self.to_f32()
    }

    #[inline]
    fn narrow(v: f32) -> Self {
        half::bf16::from_f32(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::{bf16, f16};

    #[test]
    fn test_f32_is_identity() {
        assert_eq!(f32::narrow(0.1).widen(), 0.1);
    }

    #[test]
    fn test_half_roundtrip_of_representable_values() {
        for v in [0.0f32, 1.0, -2.5, 0.125, 1024.0] {
            assert_eq!(f16::narrow(v).widen(), v);
            assert_eq!(bf16::narrow(v).widen(), v);
        }
    }

    #[test]
    fn test_narrow_rounds_to_nearest() {
        // 1 + 2^-8 lies exactly between two bf16 values; ties go to even (1.0)
        let tie = 1.0f32 + 2f32.powi(-8);
        assert_eq!(bf16::narrow(tie).widen(), 1.0);
        // slightly above the tie rounds up
        let above = 1.0f32 + 2f32.powi(-8) + 2f32.powi(-12);
        assert_eq!(bf16::narrow(above).widen(), 1.0 + 2f32.powi(-7));
    }

    #[test]
    fn test_infinities_survive() {
        assert!(f16::narrow(f32::INFINITY).widen().is_infinite());
        assert!(bf16::narrow(f32::NEG_INFINITY).widen().is_infinite());
    }
}
