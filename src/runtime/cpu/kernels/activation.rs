//! Activation kernels

use crate::dtype::FloatElement;

/// SwiGLU: `out = up * silu(gate)` where `silu(x) = x / (1 + exp(-x))`
///
/// # Safety
/// - `gate`, `up` and `out` must each point to `numel` elements
#[inline]
pub unsafe fn swiglu_kernel<T: FloatElement>(
    gate: *const T,
    up: *const T,
    out: *mut T,
    numel: usize,
) {
    for i in 0..numel {
        let g = (*gate.add(i)).widen();
        let u = (*up.add(i)).widen();
        *out.add(i) = T::narrow(u * (g / (1.0 + (-g).exp())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    #[test]
    fn test_swiglu_zero_gate_closes() {
        let gate = [0.0f32; 3];
        let up = [1.0f32, -2.0, 3.0];
        let mut out = [9.0f32; 3];
        unsafe { swiglu_kernel(gate.as_ptr(), up.as_ptr(), out.as_mut_ptr(), 3) };
        assert_eq!(out, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_swiglu_values() {
        let gate = [1.0f32, -1.0, 20.0];
        let up = [2.0f32, 2.0, 0.5];
        let mut out = [0.0f32; 3];
        unsafe { swiglu_kernel(gate.as_ptr(), up.as_ptr(), out.as_mut_ptr(), 3) };

        let silu = |x: f32| x / (1.0 + (-x).exp());
        assert!((out[0] - 2.0 * silu(1.0)).abs() < 1e-6);
        assert!((out[1] - 2.0 * silu(-1.0)).abs() < 1e-6);
        // silu saturates to the identity for large inputs
        assert!((out[2] - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_swiglu_f16() {
        let gate = [f16::from_f32(1.0)];
        let up = [f16::from_f32(2.0)];
        let mut out = [f16::ZERO];
        unsafe { swiglu_kernel(gate.as_ptr(), up.as_ptr(), out.as_mut_ptr(), 1) };
        assert!((out[0].to_f32() - 1.4621).abs() < 2e-3);
    }
}
