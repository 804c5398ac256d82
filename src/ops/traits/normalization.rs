//! Normalization operations trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Normalization operations
pub trait NormalizationOps<R: Runtime> {
    /// RMS Normalization: output = input / sqrt(mean(input^2) + eps) * weight
    ///
    /// RMSNorm is used in LLaMA and other modern transformer architectures.
    /// It normalizes each row independently.
    ///
    /// # Arguments
    ///
    /// * `out` - Output tensor of shape [batch, hidden_size]
    /// * `input` - Input tensor of shape [batch, hidden_size]
    /// * `weight` - Weight tensor of shape [hidden_size]
    /// * `eps` - Small constant for numerical stability (typically 1e-5 or 1e-6)
    fn rms_norm(
        &self,
        out: &Tensor<R>,
        input: &Tensor<R>,
        weight: &Tensor<R>,
        eps: f32,
    ) -> Result<()>;
}
