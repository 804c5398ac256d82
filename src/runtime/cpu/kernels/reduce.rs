//! Reduction kernels

use crate::dtype::FloatElement;

/// Argmax over a 1D buffer.
///
/// Comparison happens in f32; ties keep the first occurrence. The maximum is
/// stored as the original element, not a round-tripped value.
///
/// # Arguments
/// * `vals` - Input pointer (`numel` elements)
/// * `max_idx` - Output pointer for the index (one i64)
/// * `max_val` - Output pointer for the value (one element)
/// * `numel` - Number of input elements, at least 1
///
/// # Safety
/// - `vals` must point to `numel` elements and `numel > 0`
/// - `max_idx` and `max_val` must each point to one writable element
#[inline]
pub unsafe fn argmax_kernel<T: FloatElement>(
    vals: *const T,
    max_idx: *mut i64,
    max_val: *mut T,
    numel: usize,
) {
    let vals = std::slice::from_raw_parts(vals, numel);

    let mut best = 0usize;
    let mut best_val = vals[0].widen();
    for (i, v) in vals.iter().enumerate().skip(1) {
        let current = v.widen();
        if current > best_val {
            best_val = current;
            best = i;
        }
    }

    *max_idx = best as i64;
    *max_val = vals[best];
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    fn argmax<T: FloatElement>(vals: &[T]) -> (i64, T) {
        let mut idx = -1i64;
        let mut val = T::narrow(0.0);
        unsafe { argmax_kernel(vals.as_ptr(), &mut idx, &mut val, vals.len()) };
        (idx, val)
    }

    #[test]
    fn test_argmax_finds_maximum() {
        assert_eq!(argmax(&[1.0f32, 5.0, 3.0]), (1, 5.0));
        assert_eq!(argmax(&[-3.0f32, -1.0, -2.0]), (1, -1.0));
    }

    #[test]
    fn test_argmax_first_occurrence_wins() {
        assert_eq!(argmax(&[5.0f32, 5.0]), (0, 5.0));
        assert_eq!(argmax(&[1.0f32, 7.0, 2.0, 7.0]), (1, 7.0));
    }

    #[test]
    fn test_argmax_single_element() {
        assert_eq!(argmax(&[4.5f32]), (0, 4.5));
    }

    #[test]
    fn test_argmax_half() {
        let vals = [f16::from_f32(0.5), f16::from_f32(2.0), f16::from_f32(-8.0)];
        let (idx, val) = argmax(&vals);
        assert_eq!(idx, 1);
        assert_eq!(val, f16::from_f32(2.0));
    }
}
