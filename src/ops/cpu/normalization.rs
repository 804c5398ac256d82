//! CPU implementation of normalization operations.

use crate::dispatch_float_dtype;
use crate::error::Result;
use crate::ops::{NormalizationOps, validate};
use crate::runtime::DeviceKind;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;
use tracing::trace;

/// NormalizationOps implementation for CPU runtime.
impl NormalizationOps<CpuRuntime> for CpuClient {
    fn rms_norm(
        &self,
        out: &Tensor<CpuRuntime>,
        input: &Tensor<CpuRuntime>,
        weight: &Tensor<CpuRuntime>,
        eps: f32,
    ) -> Result<()> {
        const OP: &str = "rms_norm";
        let operands = [("out", out), ("input", input), ("weight", weight)];

        validate::same_device(OP, DeviceKind::Cpu, &operands)?;
        validate::rank(OP, 2, &[("out", out), ("input", input)])?;
        validate::rank(OP, 1, &[("weight", weight)])?;
        let dtype = validate::float_dtype(OP, &operands)?;

        let (batch_size, hidden_size) = (input.shape()[0], input.shape()[1]);
        validate::shape(out, input.shape())?;
        validate::shape(weight, &[hidden_size])?;
        validate::contiguous(OP, &operands)?;

        trace!(op = OP, %dtype, batch_size, hidden_size, eps, "dispatch");

        dispatch_float_dtype!(dtype, T => {
            unsafe {
                kernels::rms_norm_kernel::<T>(
                    input.data_ptr() as *const T,
                    weight.data_ptr() as *const T,
                    out.data_ptr() as *mut T,
                    batch_size,
                    hidden_size,
                    eps,
                );
            }
            Ok(())
        }, OP)
    }
}
