//! Operation traits for tensor operations.
//!
//! This module contains trait definitions for the operation families.
//! Implementations live in the backend-specific modules (cpu/).

mod activation;
mod attention;
mod indexing;
mod linear;
mod normalization;
mod rotary;

pub use activation::ActivationOps;
pub use attention::AttentionOps;
pub use indexing::IndexingOps;
pub use linear::LinearOps;
pub use normalization::NormalizationOps;
pub use rotary::RotaryOps;
