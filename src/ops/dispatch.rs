//! DType dispatch utilities
//!
//! Kernels are generic over their element type; tensors carry their dtype at
//! runtime. The macros here bridge the two by matching on a `DType` once and
//! running a code block with `T` bound to the corresponding Rust type.
//!
//! # Usage
//!
//! ```ignore
//! fn my_operation(dtype: DType) -> Result<()> {
//!     dispatch_float_dtype!(dtype, T => {
//!         // T is one of f32, half::f16, half::bf16
//!         let size = std::mem::size_of::<T>();
//!         Ok(())
//!     }, "my_operation")
//! }
//! ```
//!
//! ## Arguments
//!
//! * `$dtype` - Expression evaluating to a `DType` value
//! * `$T` - Identifier to bind to the concrete type in the body
//! * `$body` - Code block to execute with `T` bound
//! * `$error_op` - Operation name for error messages (used when dtype is unsupported)

/// Dispatch over the floating dtypes accepted by the compute kernels.
///
/// - `F32` -> `f32`
/// - `F16` -> `half::f16`
/// - `BF16` -> `half::bf16`
///
/// Every other dtype evaluates to `Err(Error::UnsupportedDType)`, so the
/// body must itself evaluate to a `Result`.
#[macro_export]
macro_rules! dispatch_float_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::F16 => {
                type $T = half::f16;
                $body
            }
            $crate::dtype::DType::BF16 => {
                type $T = half::bf16;
                $body
            }
            other => Err($crate::error::Error::UnsupportedDType {
                dtype: other,
                op: $error_op,
            }),
        }
    };
}

/// Dispatch over every dtype that maps to an [`Element`](crate::dtype::Element).
///
/// `Bool` has no element type and evaluates to `Err(Error::UnsupportedDType)`.
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::F16 => {
                type $T = half::f16;
                $body
            }
            $crate::dtype::DType::BF16 => {
                type $T = half::bf16;
                $body
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::I32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::DType::I16 => {
                type $T = i16;
                $body
            }
            $crate::dtype::DType::I8 => {
                type $T = i8;
                $body
            }
            $crate::dtype::DType::U64 => {
                type $T = u64;
                $body
            }
            $crate::dtype::DType::U32 => {
                type $T = u32;
                $body
            }
            $crate::dtype::DType::U16 => {
                type $T = u16;
                $body
            }
            $crate::dtype::DType::U8 => {
                type $T = u8;
                $body
            }
            $crate::dtype::DType::Bool => Err($crate::error::Error::UnsupportedDType {
                dtype: $crate::dtype::DType::Bool,
                op: $error_op,
            }),
        }
    };
}
