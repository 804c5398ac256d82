//! CPU implementation of activation operations.

use crate::dispatch_float_dtype;
use crate::error::Result;
use crate::ops::{ActivationOps, validate};
use crate::runtime::DeviceKind;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;
use tracing::trace;

/// ActivationOps implementation for CPU runtime.
impl ActivationOps<CpuRuntime> for CpuClient {
    fn swiglu(
        &self,
        out: &Tensor<CpuRuntime>,
        gate: &Tensor<CpuRuntime>,
        up: &Tensor<CpuRuntime>,
    ) -> Result<()> {
        const OP: &str = "swiglu";
        let operands = [("out", out), ("gate", gate), ("up", up)];

        validate::same_device(OP, DeviceKind::Cpu, &operands)?;
        validate::rank(OP, 2, &operands)?;
        let dtype = validate::float_dtype(OP, &operands)?;
        validate::shape(gate, out.shape())?;
        validate::shape(up, out.shape())?;
        validate::contiguous(OP, &operands)?;

        let numel = out.numel();
        trace!(op = OP, %dtype, numel, "dispatch");

        dispatch_float_dtype!(dtype, T => {
            unsafe {
                kernels::swiglu_kernel::<T>(
                    gate.data_ptr() as *const T,
                    up.data_ptr() as *const T,
                    out.data_ptr() as *mut T,
                    numel,
                );
            }
            Ok(())
        }, OP)
    }
}
