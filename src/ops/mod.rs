//! Tensor operations
//!
//! This module defines the operation traits for the transformer inference
//! kernels and their CPU implementations.
//!
//! # Design
//!
//! Operations are defined as traits that are implemented by the runtime
//! client. Callers allocate every output up front and pass it first; an
//! operation only writes into buffers it was given.
//!
//! ```text
//! RuntimeClient<R>
//!   ├── IndexingOps<R>      embedding, argmax
//!   ├── LinearOps<R>        linear
//!   ├── NormalizationOps<R> rms_norm
//!   ├── RotaryOps<R>        rope
//!   ├── AttentionOps<R>     self_attention
//!   └── ActivationOps<R>    swiglu
//! ```
//!
//! Every implementation follows the same three steps:
//!
//! 1. **Validate** operands with the helpers in [`validate`]: device, rank,
//!    dtype, shape, contiguity, in that order. Nothing is written on error.
//! 2. **Dispatch** the dtype once with `dispatch_float_dtype!`, binding the
//!    kernel's element type.
//! 3. **Run** the kernel on raw pointers at `storage + byte_offset`.
//!
//! ```ignore
//! let client = CpuRuntime::default_client(&device);
//! let out = Tensor::<CpuRuntime>::empty(&[1, 2], DType::F32, &device);
//! client.rms_norm(&out, &input, &weight, 1e-6)?;
//! ```

#[cfg(feature = "cpu")]
mod cpu;
mod dispatch;
mod traits;
pub mod validate;

pub use traits::*;
