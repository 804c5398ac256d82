//! Indexing operations trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Indexing operations
pub trait IndexingOps<R: Runtime> {
    /// Embedding lookup: gather rows of a table by index.
    ///
    /// `out[i, :] = weight[index[i], :]`, copied verbatim.
    ///
    /// # Arguments
    ///
    /// * `out` - Output tensor of shape [len(index), embedding_dim]
    /// * `index` - 1D I64 tensor of row indices, each in `[0, vocab_size)`
    /// * `weight` - Embedding table of shape [vocab_size, embedding_dim]
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if any index falls outside the table; no row is
    /// written in that case.
    fn embedding(&self, out: &Tensor<R>, index: &Tensor<R>, weight: &Tensor<R>) -> Result<()>;

    /// Argmax over a 1D tensor.
    ///
    /// Writes the position of the largest value into `max_idx` (one I64
    /// element) and the value itself into `max_val` (one element of the
    /// input's dtype). When several positions hold the maximum, the first
    /// one wins.
    fn argmax(&self, max_idx: &Tensor<R>, max_val: &Tensor<R>, vals: &Tensor<R>) -> Result<()>;
}
