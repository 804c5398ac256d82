//! CPU kernel implementations
//!
//! Low-level compute kernels over raw typed pointers. Kernels know nothing
//! about tensors: callers validate shapes, resolve the dtype and pass
//! pointers to contiguous buffers. Floating point kernels are generic over
//! `T: FloatElement` and compute in f32.

pub mod activation;
pub mod attention;
pub mod index;
pub mod matmul;
pub mod norm;
pub mod reduce;
pub mod rope;

pub use activation::swiglu_kernel;
pub use attention::self_attention_kernel;
pub use index::embedding_kernel;
pub use matmul::linear_kernel;
pub use norm::rms_norm_kernel;
pub use reduce::argmax_kernel;
pub use rope::rope_kernel;
