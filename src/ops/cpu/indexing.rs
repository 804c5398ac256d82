//! CPU implementation of indexing operations.

use crate::dispatch_float_dtype;
use crate::error::{Error, Result};
use crate::ops::{IndexingOps, validate};
use crate::runtime::DeviceKind;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;
use tracing::trace;

/// IndexingOps implementation for CPU runtime.
impl IndexingOps<CpuRuntime> for CpuClient {
    fn embedding(
        &self,
        out: &Tensor<CpuRuntime>,
        index: &Tensor<CpuRuntime>,
        weight: &Tensor<CpuRuntime>,
    ) -> Result<()> {
        const OP: &str = "embedding";
        let operands = [("out", out), ("index", index), ("weight", weight)];

        validate::same_device(OP, DeviceKind::Cpu, &operands)?;
        validate::rank(OP, 1, &[("index", index)])?;
        validate::rank(OP, 2, &[("out", out), ("weight", weight)])?;
        let dtype = validate::float_dtype(OP, &[("out", out), ("weight", weight)])?;
        validate::index_dtype(index)?;

        let num_indices = index.shape()[0];
        let (vocab_size, embedding_dim) = (weight.shape()[0], weight.shape()[1]);
        validate::shape(out, &[num_indices, embedding_dim])?;
        validate::contiguous(OP, &operands)?;

        // Every index is checked before the first row is written.
        for idx in index.try_to_vec::<i64>()? {
            if idx < 0 || idx as usize >= vocab_size {
                return Err(Error::IndexOutOfBounds {
                    index: idx,
                    size: vocab_size,
                });
            }
        }

        trace!(op = OP, %dtype, num_indices, vocab_size, embedding_dim, "dispatch");

        dispatch_float_dtype!(dtype, T => {
            unsafe {
                kernels::embedding_kernel::<T>(
                    weight.data_ptr() as *const T,
                    index.data_ptr() as *const i64,
                    out.data_ptr() as *mut T,
                    num_indices,
                    embedding_dim,
                );
            }
            Ok(())
        }, OP)
    }

    fn argmax(
        &self,
        max_idx: &Tensor<CpuRuntime>,
        max_val: &Tensor<CpuRuntime>,
        vals: &Tensor<CpuRuntime>,
    ) -> Result<()> {
        const OP: &str = "argmax";
        let operands = [("max_idx", max_idx), ("max_val", max_val), ("vals", vals)];

        validate::same_device(OP, DeviceKind::Cpu, &operands)?;
        validate::rank(OP, 1, &[("vals", vals)])?;
        let dtype = validate::float_dtype(OP, &[("vals", vals), ("max_val", max_val)])?;
        validate::index_dtype(max_idx)?;

        let numel = vals.numel();
        if numel == 0 {
            return Err(Error::invalid_argument("vals", "argmax of an empty tensor"));
        }
        for out in [max_idx, max_val] {
            if out.numel() != 1 {
                return Err(Error::shape_mismatch(&[1], out.shape()));
            }
        }
        validate::contiguous(OP, &operands)?;

        trace!(op = OP, %dtype, numel, "dispatch");

        dispatch_float_dtype!(dtype, T => {
            unsafe {
                kernels::argmax_kernel::<T>(
                    vals.data_ptr() as *const T,
                    max_idx.data_ptr() as *mut i64,
                    max_val.data_ptr() as *mut T,
                    numel,
                );
            }
            Ok(())
        }, OP)
    }
}
