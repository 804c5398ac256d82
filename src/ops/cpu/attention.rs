//! CPU implementation of self-attention.

use crate::dispatch_float_dtype;
use crate::error::{Error, Result};
use crate::ops::{AttentionOps, validate};
use crate::runtime::DeviceKind;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;
use tracing::trace;

/// AttentionOps implementation for CPU runtime.
impl AttentionOps<CpuRuntime> for CpuClient {
    fn self_attention(
        &self,
        out: &Tensor<CpuRuntime>,
        q: &Tensor<CpuRuntime>,
        k: &Tensor<CpuRuntime>,
        v: &Tensor<CpuRuntime>,
        scale: f32,
    ) -> Result<()> {
        const OP: &str = "self_attention";
        let operands = [("out", out), ("q", q), ("k", k), ("v", v)];

        validate::same_device(OP, DeviceKind::Cpu, &operands)?;
        validate::rank(OP, 3, &operands)?;
        let dtype = validate::float_dtype(OP, &operands)?;

        let [qlen, n_heads, head_dim] = [q.shape()[0], q.shape()[1], q.shape()[2]];
        let [kvlen, n_kv_heads] = [k.shape()[0], k.shape()[1]];
        validate::shape(k, &[kvlen, n_kv_heads, head_dim])?;
        validate::shape(v, k.shape())?;
        validate::shape(out, q.shape())?;
        if n_kv_heads == 0 || n_heads % n_kv_heads != 0 {
            return Err(Error::invalid_argument(
                "k",
                format!("{n_heads} query heads cannot be grouped over {n_kv_heads} kv heads"),
            ));
        }
        if kvlen < qlen {
            return Err(Error::invalid_argument(
                "k",
                format!("kv length {kvlen} is shorter than query length {qlen}"),
            ));
        }
        validate::contiguous(OP, &operands)?;

        trace!(
            op = OP,
            %dtype,
            qlen,
            kvlen,
            n_heads,
            n_kv_heads,
            head_dim,
            scale,
            "dispatch"
        );

        dispatch_float_dtype!(dtype, T => {
            unsafe {
                kernels::self_attention_kernel::<T>(
                    q.data_ptr() as *const T,
                    k.data_ptr() as *const T,
                    v.data_ptr() as *const T,
                    out.data_ptr() as *mut T,
                    qlen,
                    kvlen,
                    n_heads,
                    n_kv_heads,
                    head_dim,
                    scale,
                );
            }
            Ok(())
        }, OP)
    }
}
