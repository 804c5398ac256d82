//! Causal self-attention kernel

use crate::dtype::FloatElement;

/// Grouped-query causal self-attention
///
/// Shapes (row-major, contiguous):
/// - `q`, `out`: [qlen, n_heads, head_dim]
/// - `k`, `v`: [kvlen, n_kv_heads, head_dim]
///
/// Query position `i` sits at absolute position `kvlen - qlen + i` and may
/// attend to key positions up to and including that one. Query head `h` reads
/// key/value head `h / (n_heads / n_kv_heads)`.
///
/// Softmax subtracts the largest unmasked score; masked positions get weight
/// zero. Scores, weights and the weighted sum of values are all f32.
///
/// # Safety
/// - All pointers must be valid for the shapes above
/// - `kvlen >= qlen`, `n_kv_heads > 0` and `n_heads % n_kv_heads == 0`
/// - `out` must not alias `q`, `k` or `v`
#[inline]
#[allow(clippy::too_many_arguments)]
pub unsafe fn self_attention_kernel<T: FloatElement>(
    q: *const T,
    k: *const T,
    v: *const T,
    out: *mut T,
    qlen: usize,
    kvlen: usize,
    n_heads: usize,
    n_kv_heads: usize,
    head_dim: usize,
    scale: f32,
) {
    let group = n_heads / n_kv_heads;
    let q_stride = n_heads * head_dim;
    let kv_stride = n_kv_heads * head_dim;

    let mut weights = vec![0.0f32; kvlen];
    let mut acc = vec![0.0f32; head_dim];

    for qi in 0..qlen {
        let abs_pos = kvlen - qlen + qi;
        // Positions past abs_pos are masked out.
        let visible = abs_pos + 1;

        for h in 0..n_heads {
            let kv_h = h / group;
            let q_row = q.add(qi * q_stride + h * head_dim);

            let mut max_score = f32::NEG_INFINITY;
            for (kv_pos, w) in weights.iter_mut().enumerate().take(visible) {
                let k_row = k.add(kv_pos * kv_stride + kv_h * head_dim);
                let mut dot = 0.0f32;
                for d in 0..head_dim {
                    dot += (*q_row.add(d)).widen() * (*k_row.add(d)).widen();
                }
                let score = dot * scale;
                if score.is_finite() && score > max_score {
                    max_score = score;
                }
                *w = score;
            }

            let mut sum = 0.0f32;
            for (kv_pos, w) in weights.iter_mut().enumerate() {
                if kv_pos < visible && w.is_finite() {
                    *w = (*w - max_score).exp();
                    sum += *w;
                } else {
                    *w = 0.0;
                }
            }

            acc.fill(0.0);
            for (kv_pos, &w) in weights.iter().enumerate().take(visible) {
                if w == 0.0 {
                    continue;
                }
                let p = w / sum;
                let v_row = v.add(kv_pos * kv_stride + kv_h * head_dim);
                for (d, a) in acc.iter_mut().enumerate() {
                    *a += p * (*v_row.add(d)).widen();
                }
            }

            let out_row = out.add(qi * q_stride + h * head_dim);
            for (d, &a) in acc.iter().enumerate() {
                *out_row.add(d) = T::narrow(a);
            }
        }
    }
}
