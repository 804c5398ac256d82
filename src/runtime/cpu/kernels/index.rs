//! Indexing kernels

use crate::dtype::Element;

/// Embedding lookup: copy rows of a 2D table selected by a 1D index.
///
/// ```text
/// for i in 0..num_indices:
///     out[i, :] = embeddings[indices[i], :]
/// ```
///
/// Rows are copied verbatim; no arithmetic touches the values.
///
/// # Arguments
/// * `embeddings` - 2D embedding table pointer [vocab_size, embedding_dim]
/// * `indices` - 1D index pointer (i64 values)
/// * `out` - Output pointer [num_indices, embedding_dim]
/// * `num_indices` - Number of indices
/// * `embedding_dim` - Dimension of each embedding vector
///
/// # Safety
/// - All pointers must be valid for the specified sizes
/// - Every index must lie in `[0, vocab_size)`; callers check this before dispatch
/// - `out` must not alias `embeddings`
#[inline]
pub unsafe fn embedding_kernel<T: Element>(
    embeddings: *const T,
    indices: *const i64,
    out: *mut T,
    num_indices: usize,
    embedding_dim: usize,
) {
    if num_indices == 0 || embedding_dim == 0 {
        return;
    }

    let indices_slice = std::slice::from_raw_parts(indices, num_indices);

    for (i, &idx_val) in indices_slice.iter().enumerate() {
        let src_offset = (idx_val as usize) * embedding_dim;

        std::ptr::copy_nonoverlapping(
            embeddings.add(src_offset),
            out.add(i * embedding_dim),
            embedding_dim,
        );
    }
}
