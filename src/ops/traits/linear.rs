//! Linear projection trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Affine projection operations
pub trait LinearOps<R: Runtime> {
    /// Linear projection: `out = input @ weight^T + bias`
    ///
    /// The weight follows the usual checkpoint layout of one row per output
    /// feature, so no transposed copy is ever made.
    ///
    /// # Arguments
    ///
    /// * `out` - Output tensor of shape [batch, out_features]
    /// * `input` - Input tensor of shape [batch, in_features]
    /// * `weight` - Weight tensor of shape [out_features, in_features]
    /// * `bias` - Optional bias tensor of shape [out_features]
    fn linear(
        &self,
        out: &Tensor<R>,
        input: &Tensor<R>,
        weight: &Tensor<R>,
        bias: Option<&Tensor<R>>,
    ) -> Result<()>;
}
