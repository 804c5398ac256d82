//! # infercore
//!
//! **Strided tensors and reference kernels for transformer inference.**
//!
//! infercore provides n-dimensional tensor views over shared device memory and
//! the handful of kernels a decoder-only language model needs per token:
//! embedding lookup, linear projection, RMS normalization, rotary position
//! embedding, causal grouped-query self-attention, SwiGLU and argmax.
//!
//! ## Features
//!
//! - **Tensors**: shape/stride/offset views; permute, slice and view never copy
//! - **Mixed precision**: f32, f16 and bf16 kernels that compute in f32
//! - **Validation**: every contract is checked before an output is touched
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use infercore::prelude::*;
//!
//! let device = CpuDevice::new();
//! let client = CpuRuntime::default_client(&device);
//!
//! let x = Tensor::<CpuRuntime>::from_slice(&[3.0f32, 4.0], &[1, 2], &device);
//! let w = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 1.0], &[2], &device);
//! let out = Tensor::<CpuRuntime>::empty(&[1, 2], DType::F32, &device);
//!
//! client.rms_norm(&out, &x, &w, 1e-6)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `cpu` (default): CPU reference backend

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod dtype;
pub mod error;
pub mod ops;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element, FloatElement};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{
        ActivationOps, AttentionOps, IndexingOps, LinearOps, NormalizationOps, RotaryOps,
    };
    pub use crate::runtime::{Device, DeviceKind, Runtime, RuntimeClient};
    pub use crate::tensor::{Layout, Tensor};

    #[cfg(feature = "cpu")]
    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
}
