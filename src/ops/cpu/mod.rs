//! CPU implementation of tensor operations.
//!
//! Each operation validates its operands, resolves the dtype once and hands
//! raw pointers to the matching kernel in `runtime::cpu::kernels`.

mod activation;
mod attention;
mod indexing;
mod linear;
mod normalization;
mod rotary;
