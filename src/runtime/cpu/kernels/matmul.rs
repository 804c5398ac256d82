//! Affine projection kernels

use crate::dtype::FloatElement;

/// Linear projection with optional bias: `out = input @ weight^T + bias`
///
/// The weight is stored row per output feature, `[out_features, in_features]`,
/// so each output element is a dot product of two contiguous rows. Products
/// are accumulated in f32 and the bias is added before narrowing.
///
/// # Arguments
/// * `input` - Pointer to input matrix [batch, in_features], row-major
/// * `weight` - Pointer to weight matrix [out_features, in_features], row-major
/// * `bias` - Optional pointer to bias vector [out_features]
/// * `out` - Pointer to output matrix [batch, out_features], row-major
///
/// # Safety
/// - All pointers must be valid for the specified dimensions
/// - `out` must not alias `input`, `weight` or `bias`
#[inline]
#[allow(clippy::too_many_arguments)]
pub unsafe fn linear_kernel<T: FloatElement>(
    input: *const T,
    weight: *const T,
    bias: Option<*const T>,
    out: *mut T,
    batch: usize,
    in_features: usize,
    out_features: usize,
) {
    if batch == 0 || out_features == 0 {
        return;
    }

    for b in 0..batch {
        // Zero-width rows may come from a null handle.
        let in_row: &[T] = if in_features == 0 {
            &[]
        } else {
            std::slice::from_raw_parts(input.add(b * in_features), in_features)
        };

        for o in 0..out_features {
            let w_row: &[T] = if in_features == 0 {
                &[]
            } else {
                std::slice::from_raw_parts(weight.add(o * in_features), in_features)
            };

            let mut acc = 0.0f32;
            for (x, w) in in_row.iter().zip(w_row) {
                acc += x.widen() * w.widen();
            }
            if let Some(bias) = bias {
                acc += (*bias.add(o)).widen();
            }

            *out.add(b * out_features + o) = T::narrow(acc);
        }
    }
}
