//! Operand validation shared by every operation
//!
//! Operations run these checks in a fixed order before touching any output:
//! device, rank, dtype, shape, contiguity. Each helper reports the first
//! violation it finds.

use crate::dtype::{DType, DTypeSet};
use crate::error::{Error, Result};
use crate::runtime::{Device, DeviceKind, Runtime};
use crate::tensor::Tensor;

/// A named operand, so errors can say which argument was wrong.
pub type Operand<'a, R> = (&'static str, &'a Tensor<R>);

/// All operands live on one device of the expected kind.
pub fn same_device<R: Runtime>(
    op: &'static str,
    kind: DeviceKind,
    operands: &[Operand<'_, R>],
) -> Result<()> {
    let Some((_, first)) = operands.first() else {
        return Ok(());
    };
    let device = first.device();

    if operands.iter().any(|(_, t)| !t.device().is_same(device)) {
        return Err(Error::DeviceMismatch);
    }
    if device.kind() != kind {
        return Err(Error::UnsupportedDevice {
            device: device.name(),
            op,
        });
    }
    Ok(())
}

/// Every operand has `expected` dimensions.
pub fn rank<R: Runtime>(
    op: &'static str,
    expected: usize,
    operands: &[Operand<'_, R>],
) -> Result<()> {
    for &(arg, t) in operands {
        if t.ndim() != expected {
            return Err(Error::rank_mismatch(op, arg, expected, t.ndim()));
        }
    }
    Ok(())
}

/// Floating operands share one dtype with a kernel implementation.
///
/// Returns the common dtype.
pub fn float_dtype<R: Runtime>(op: &'static str, operands: &[Operand<'_, R>]) -> Result<DType> {
    let Some((_, first)) = operands.first() else {
        return Err(Error::invalid_argument("operands", "no tensors to validate"));
    };
    let dtype = first.dtype();

    for (_, t) in &operands[1..] {
        if t.dtype() != dtype {
            return Err(Error::DTypeMismatch {
                lhs: dtype,
                rhs: t.dtype(),
            });
        }
    }
    if !DTypeSet::KERNEL_FLOATS.contains(dtype) {
        return Err(Error::unsupported_dtype(dtype, op));
    }
    Ok(dtype)
}

/// Index and position operands are I64.
pub fn index_dtype<R: Runtime>(t: &Tensor<R>) -> Result<()> {
    if t.dtype() != DType::index() {
        return Err(Error::DTypeMismatch {
            lhs: DType::index(),
            rhs: t.dtype(),
        });
    }
    Ok(())
}

/// The operand has exactly `expected` shape.
pub fn shape<R: Runtime>(t: &Tensor<R>, expected: &[usize]) -> Result<()> {
    if t.shape() != expected {
        return Err(Error::shape_mismatch(expected, t.shape()));
    }
    Ok(())
}

/// Every operand is contiguous.
pub fn contiguous<R: Runtime>(op: &'static str, operands: &[Operand<'_, R>]) -> Result<()> {
    for &(arg, t) in operands {
        if !t.is_contiguous() {
            return Err(Error::not_contiguous(op, arg));
        }
    }
    Ok(())
}

#[cfg(all(test, feature = "cpu"))]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    fn f32s(shape: &[usize], device: &CpuDevice) -> Tensor<CpuRuntime> {
        Tensor::empty(shape, DType::F32, device)
    }

    #[test]
    fn test_same_device() {
        let d0 = CpuDevice::new();
        let a = f32s(&[2], &d0);
        let b = f32s(&[2], &d0);
        assert!(same_device("op", DeviceKind::Cpu, &[("a", &a), ("b", &b)]).is_ok());

        let c = f32s(&[2], &CpuDevice::with_id(1));
        assert!(matches!(
            same_device("op", DeviceKind::Cpu, &[("a", &a), ("c", &c)]),
            Err(Error::DeviceMismatch)
        ));

        assert!(matches!(
            same_device("op", DeviceKind::Nvidia, &[("a", &a)]),
            Err(Error::UnsupportedDevice { .. })
        ));
    }

    #[test]
    fn test_rank_names_operand() {
        let device = CpuDevice::new();
        let a = f32s(&[2, 2], &device);
        let b = f32s(&[4], &device);
        let err = rank("linear", 2, &[("a", &a), ("b", &b)]).unwrap_err();
        assert!(matches!(
            err,
            Error::RankMismatch {
                op: "linear",
                arg: "b",
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_float_dtype() {
        let device = CpuDevice::new();
        let a = f32s(&[2], &device);
        let h = Tensor::<CpuRuntime>::empty(&[2], DType::F16, &device);
        let d = Tensor::<CpuRuntime>::empty(&[2], DType::F64, &device);

        assert_eq!(float_dtype("op", &[("a", &a)]).unwrap(), DType::F32);
        assert!(matches!(
            float_dtype("op", &[("a", &a), ("h", &h)]),
            Err(Error::DTypeMismatch { .. })
        ));
        assert!(matches!(
            float_dtype("op", &[("d", &d)]),
            Err(Error::UnsupportedDType { .. })
        ));
    }

    #[test]
    fn test_index_dtype() {
        let device = CpuDevice::new();
        let idx = Tensor::<CpuRuntime>::empty(&[2], DType::I64, &device);
        let bad = Tensor::<CpuRuntime>::empty(&[2], DType::I32, &device);
        assert!(index_dtype(&idx).is_ok());
        assert!(matches!(
            index_dtype(&bad),
            Err(Error::DTypeMismatch {
                lhs: DType::I64,
                rhs: DType::I32
            })
        ));
    }

    #[test]
    fn test_contiguous() {
        let device = CpuDevice::new();
        let a = f32s(&[2, 3], &device);
        let t = a.permute(&[1, 0]).unwrap();
        assert!(contiguous("op", &[("a", &a)]).is_ok());
        assert!(matches!(
            contiguous("op", &[("a", &a), ("t", &t)]),
            Err(Error::NotContiguous { op: "op", arg: "t" })
        ));
    }
}
