//! Activation operations trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Activation operations
pub trait ActivationOps<R: Runtime> {
    /// SwiGLU gated activation: `out = up * silu(gate)`
    ///
    /// `gate`, `up` and `out` are 2D tensors of one shape.
    fn swiglu(&self, out: &Tensor<R>, gate: &Tensor<R>, up: &Tensor<R>) -> Result<()>;
}
