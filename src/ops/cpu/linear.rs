//! CPU implementation of linear projection.

use crate::dispatch_float_dtype;
use crate::error::Result;
use crate::ops::{LinearOps, validate};
use crate::runtime::DeviceKind;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;
use tracing::trace;

/// LinearOps implementation for CPU runtime.
impl LinearOps<CpuRuntime> for CpuClient {
    fn linear(
        &self,
        out: &Tensor<CpuRuntime>,
        input: &Tensor<CpuRuntime>,
        weight: &Tensor<CpuRuntime>,
        bias: Option<&Tensor<CpuRuntime>>,
    ) -> Result<()> {
        const OP: &str = "linear";
        let mut operands = vec![("out", out), ("input", input), ("weight", weight)];
        if let Some(bias) = bias {
            operands.push(("bias", bias));
        }

        validate::same_device(OP, DeviceKind::Cpu, &operands)?;
        validate::rank(OP, 2, &operands[..3])?;
        if let Some(bias) = bias {
            validate::rank(OP, 1, &[("bias", bias)])?;
        }
        let dtype = validate::float_dtype(OP, &operands)?;

        let (batch, in_features) = (input.shape()[0], input.shape()[1]);
        let out_features = weight.shape()[0];
        validate::shape(weight, &[out_features, in_features])?;
        validate::shape(out, &[batch, out_features])?;
        if let Some(bias) = bias {
            validate::shape(bias, &[out_features])?;
        }
        validate::contiguous(OP, &operands)?;

        trace!(
            op = OP,
            %dtype,
            batch,
            in_features,
            out_features,
            has_bias = bias.is_some(),
            "dispatch"
        );

        dispatch_float_dtype!(dtype, T => {
            unsafe {
                kernels::linear_kernel::<T>(
                    input.data_ptr() as *const T,
                    weight.data_ptr() as *const T,
                    bias.map(|b| b.data_ptr() as *const T),
                    out.data_ptr() as *mut T,
                    batch,
                    in_features,
                    out_features,
                );
            }
            Ok(())
        }, OP)
    }
}
