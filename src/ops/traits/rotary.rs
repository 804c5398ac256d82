//! Rotary position embedding trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Rotary position embedding operations
pub trait RotaryOps<R: Runtime> {
    /// Rotate each head vector by angles derived from its sequence position.
    ///
    /// Element `j` of the first half of a head is paired with element `j` of
    /// the second half and rotated by `pos / theta^(2j / head_dim)`.
    ///
    /// # Arguments
    ///
    /// * `out` - Output tensor of shape [seq_len, n_heads, head_dim]
    /// * `input` - Input tensor of shape [seq_len, n_heads, head_dim], `head_dim` even
    /// * `pos_ids` - 1D I64 tensor of shape [seq_len]
    /// * `theta` - Frequency base
    fn rope(
        &self,
        out: &Tensor<R>,
        input: &Tensor<R>,
        pos_ids: &Tensor<R>,
        theta: f32,
    ) -> Result<()>;
}
