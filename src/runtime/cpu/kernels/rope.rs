//! Rotary position embedding kernel

use crate::dtype::FloatElement;

/// Rotary position embedding over `[seq_len, n_heads, head_dim]`
///
/// Each head vector is split into halves. Element `j` of the first half is
/// rotated together with element `j` of the second half by the angle
/// `pos / theta^(2j / head_dim)`:
///
/// ```text
/// a' = a * cos(phi) - b * sin(phi)
/// b' = b * cos(phi) + a * sin(phi)
/// ```
///
/// # Arguments
/// * `input` - Input pointer [seq_len, n_heads, head_dim]
/// * `pos_ids` - Position of each sequence entry (i64) [seq_len]
/// * `out` - Output pointer, same shape as input
/// * `theta` - Frequency base (10000.0 in LLaMA)
///
/// # Safety
/// - `input` and `out` must point to `seq_len * n_heads * head_dim` elements
/// - `pos_ids` must point to `seq_len` elements
/// - `head_dim` must be even
#[inline]
#[allow(clippy::too_many_arguments)]
pub unsafe fn rope_kernel<T: FloatElement>(
    input: *const T,
    pos_ids: *const i64,
    out: *mut T,
    seq_len: usize,
    n_heads: usize,
    head_dim: usize,
    theta: f32,
) {
    if seq_len == 0 {
        return;
    }

    let half_dim = head_dim / 2;
    let positions = std::slice::from_raw_parts(pos_ids, seq_len);

    // Inverse frequencies are shared by every position and head.
    let inv_freq: Vec<f32> = (0..half_dim)
        .map(|j| 1.0 / theta.powf((2 * j) as f32 / head_dim as f32))
        .collect();

    for (s, &pos) in positions.iter().enumerate() {
        let pos = pos as f32;

        for h in 0..n_heads {
            let base = (s * n_heads + h) * head_dim;

            for (j, freq) in inv_freq.iter().enumerate() {
                let (sin, cos) = (pos * freq).sin_cos();
                let a = (*input.add(base + j)).widen();
                let b = (*input.add(base + half_dim + j)).widen();

                *out.add(base + j) = T::narrow(a * cos - b * sin);
                *out.add(base + half_dim + j) = T::narrow(b * cos + a * sin);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::bf16;

    #[test]
    fn test_rope_position_zero_is_identity() {
        let input = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let mut out = [0.0f32; 8];

        unsafe {
            rope_kernel(input.as_ptr(), [0i64].as_ptr(), out.as_mut_ptr(), 1, 2, 4, 10000.0);
        }
        assert_eq!(out, input);
    }

    #[test]
    fn test_rope_rotates_first_pair_by_position() {
        // head_dim 2: the single pair rotates by exactly `pos` radians
        let input = [1.0f32, 0.0, 1.0, 0.0];
        let mut out = [0.0f32; 4];
        let pos = [0i64, 1];

        unsafe {
            rope_kernel(input.as_ptr(), pos.as_ptr(), out.as_mut_ptr(), 2, 1, 2, 10000.0);
        }
        assert_eq!(&out[..2], &[1.0, 0.0]);
        assert!((out[2] - 1.0f32.cos()).abs() < 1e-6);
        assert!((out[3] - 1.0f32.sin()).abs() < 1e-6);
    }

    #[test]
    fn test_rope_preserves_pair_norm() {
        let input = [0.3f32, -1.2, 0.7, 2.0];
        let mut out = [0.0f32; 4];

        unsafe {
            rope_kernel(input.as_ptr(), [17i64].as_ptr(), out.as_mut_ptr(), 1, 1, 4, 10000.0);
        }
        for j in 0..2 {
            let before = input[j].hypot(input[j + 2]);
            let after = out[j].hypot(out[j + 2]);
            assert!((before - after).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rope_bf16_position_zero() {
        let input = [bf16::from_f32(1.5), bf16::from_f32(-2.0)];
        let mut out = [bf16::ZERO; 2];

        unsafe {
            rope_kernel(input.as_ptr(), [0i64].as_ptr(), out.as_mut_ptr(), 1, 1, 2, 10000.0);
        }
        assert_eq!(out, input);
    }
}
