//! Self-attention trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Attention operations
pub trait AttentionOps<R: Runtime> {
    /// Causal grouped-query self-attention.
    ///
    /// Query row `i` is the last `qlen` positions of a `kvlen`-long sequence,
    /// so it attends to key positions `0..=kvlen - qlen + i`. Each group of
    /// `n_heads / n_kv_heads` consecutive query heads shares one key/value head.
    ///
    /// # Arguments
    ///
    /// * `out` - Output tensor of shape [qlen, n_heads, head_dim]
    /// * `q` - Query tensor of shape [qlen, n_heads, head_dim]
    /// * `k` - Key tensor of shape [kvlen, n_kv_heads, head_dim]
    /// * `v` - Value tensor of shape [kvlen, n_kv_heads, head_dim]
    /// * `scale` - Score multiplier, usually `1 / sqrt(head_dim)`
    fn self_attention(
        &self,
        out: &Tensor<R>,
        q: &Tensor<R>,
        k: &Tensor<R>,
        v: &Tensor<R>,
        scale: f32,
    ) -> Result<()>;
}
