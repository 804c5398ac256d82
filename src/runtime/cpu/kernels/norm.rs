//! Normalization operation kernels

use crate::dtype::FloatElement;

/// RMS Normalization: output = input / sqrt(mean(input^2) + eps) * weight
///
/// Normalizes over the last dimension. Used in LLaMA and other modern transformers.
///
/// # Arguments
/// * `input` - Input tensor data, shape [batch_size, hidden_size] flattened
/// * `weight` - Weight tensor, shape [hidden_size]
/// * `out` - Output tensor, same shape as input
/// * `batch_size` - Number of rows
/// * `hidden_size` - Size of each row (dimension to normalize over)
/// * `eps` - Small constant for numerical stability
///
/// # Safety
/// - `input` and `out` must be valid pointers to `batch_size * hidden_size` elements
/// - `weight` must be valid pointer to `hidden_size` elements
#[inline]
pub unsafe fn rms_norm_kernel<T: FloatElement>(
    input: *const T,
    weight: *const T,
    out: *mut T,
    batch_size: usize,
    hidden_size: usize,
    eps: f32,
) {
    if hidden_size == 0 {
        return;
    }
    let weight_slice = std::slice::from_raw_parts(weight, hidden_size);

    for batch in 0..batch_size {
        let row_start = batch * hidden_size;

        // Compute sum of squares
        let mut sum_sq = 0.0f32;
        for i in 0..hidden_size {
            let x = (*input.add(row_start + i)).widen();
            sum_sq += x * x;
        }

        // Compute RMS: sqrt(mean(x^2) + eps)
        let rms = (sum_sq / hidden_size as f32 + eps).sqrt();

        // Apply normalization and weight
        for (i, w) in weight_slice.iter().enumerate() {
            let x = (*input.add(row_start + i)).widen();
            *out.add(row_start + i) = T::narrow(w.widen() * (x / rms));
        }
    }
}
