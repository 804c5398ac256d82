//! CPU implementation of rotary position embedding.

use crate::dispatch_float_dtype;
use crate::error::{Error, Result};
use crate::ops::{RotaryOps, validate};
use crate::runtime::DeviceKind;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;
use tracing::trace;

/// RotaryOps implementation for CPU runtime.
impl RotaryOps<CpuRuntime> for CpuClient {
    fn rope(
        &self,
        out: &Tensor<CpuRuntime>,
        input: &Tensor<CpuRuntime>,
        pos_ids: &Tensor<CpuRuntime>,
        theta: f32,
    ) -> Result<()> {
        const OP: &str = "rope";
        let operands = [("out", out), ("input", input), ("pos_ids", pos_ids)];

        validate::same_device(OP, DeviceKind::Cpu, &operands)?;
        validate::rank(OP, 3, &[("out", out), ("input", input)])?;
        validate::rank(OP, 1, &[("pos_ids", pos_ids)])?;
        let dtype = validate::float_dtype(OP, &[("out", out), ("input", input)])?;
        validate::index_dtype(pos_ids)?;

        let [seq_len, n_heads, head_dim] = [input.shape()[0], input.shape()[1], input.shape()[2]];
        validate::shape(out, input.shape())?;
        validate::shape(pos_ids, &[seq_len])?;
        if head_dim % 2 != 0 {
            return Err(Error::invalid_argument(
                "input",
                format!("head_dim must be even, got {head_dim}"),
            ));
        }
        validate::contiguous(OP, &operands)?;

        trace!(op = OP, %dtype, seq_len, n_heads, head_dim, theta, "dispatch");

        dispatch_float_dtype!(dtype, T => {
            unsafe {
                kernels::rope_kernel::<T>(
                    input.data_ptr() as *const T,
                    pos_ids.data_ptr() as *const i64,
                    out.data_ptr() as *mut T,
                    seq_len,
                    n_heads,
                    head_dim,
                    theta,
                );
            }
            Ok(())
        }, OP)
    }
}
