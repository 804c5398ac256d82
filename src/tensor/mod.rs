//! Tensor types and operations
//!
//! This module provides the core `Tensor` type, an n-dimensional view over a
//! shared block of device memory, together with the `Layout` that maps
//! logical indices to element positions and the reference-counted `Storage`.

mod core;
mod layout;
mod storage;

pub use core::Tensor;
pub use layout::{Layout, Shape, Strides};
pub use storage::Storage;
