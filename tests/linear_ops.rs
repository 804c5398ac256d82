//! Tests for the linear projection `out = input @ weight^T + bias`.

mod common;

use common::{assert_allclose_f32, bf16_to_f32, bf16_tensor, create_cpu_client};
use infercore::dtype::DType;
use infercore::error::Error;
use infercore::ops::LinearOps;
use infercore::runtime::cpu::CpuRuntime;
use infercore::tensor::Tensor;

// ============================================================================
// Values
// ============================================================================

#[test]
fn test_linear_identity_projection() {
    let (client, device) = create_cpu_client();

    let input = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[1, 2], &device);
    let weight = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 0.0, 0.0, 1.0], &[2, 2], &device);
    let out = Tensor::<CpuRuntime>::empty(&[1, 2], DType::F32, &device);

    client.linear(&out, &input, &weight, None).unwrap();
    assert_eq!(out.to_vec::<f32>(), [1.0, 2.0]);
}

#[test]
fn test_linear_3x2_to_4_with_bias() {
    let (client, device) = create_cpu_client();

    // input [[1, 2], [3, 4], [5, 6]] (3x2)
    // weight rows are output features (4x2)
    // input @ weight^T = [[11, 14, 17, 20], [23, 30, 37, 44], [35, 46, 57, 68]]
    let input =
        Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2], &device);
    let weight = Tensor::<CpuRuntime>::from_slice(
        &[1.0f32, 5.0, 2.0, 6.0, 3.0, 7.0, 4.0, 8.0],
        &[4, 2],
        &device,
    );
    let bias = Tensor::<CpuRuntime>::from_slice(&[0.1f32, 0.2, 0.3, 0.4], &[4], &device);
    let out = Tensor::<CpuRuntime>::empty(&[3, 4], DType::F32, &device);

    client.linear(&out, &input, &weight, Some(&bias)).unwrap();

    let expected = [
        11.1, 14.2, 17.3, 20.4, // Row 0
        23.1, 30.2, 37.3, 44.4, // Row 1
        35.1, 46.2, 57.3, 68.4, // Row 2
    ];
    assert_allclose_f32(&out.to_vec::<f32>(), &expected, 0.0, 1e-5, "linear with bias");
}

#[test]
fn test_linear_bf16() {
    let (client, device) = create_cpu_client();

    let input = bf16_tensor(&[1.0, 2.0, 3.0], &[1, 3], &device);
    let weight = bf16_tensor(&[1.0, 1.0, 1.0, 0.5, -1.0, 2.0], &[2, 3], &device);
    let bias = bf16_tensor(&[0.0, 1.0], &[2], &device);
    let out = Tensor::<CpuRuntime>::empty(&[1, 2], DType::BF16, &device);

    client.linear(&out, &input, &weight, Some(&bias)).unwrap();
    assert_eq!(bf16_to_f32(&out), [6.0, 5.5]);
}

#[test]
fn test_linear_writes_into_row_slice() {
    let (client, device) = create_cpu_client();

    let input = Tensor::<CpuRuntime>::from_slice(&[2.0f32, 3.0], &[1, 2], &device);
    let weight = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 1.0], &[1, 2], &device);
    let buffer = Tensor::<CpuRuntime>::zeros(&[3, 1], DType::F32, &device);
    let row = buffer.slice(0, 1, 2).unwrap();

    client.linear(&row, &input, &weight, None).unwrap();
    assert_eq!(buffer.to_vec::<f32>(), [0.0, 5.0, 0.0]);
}

// ============================================================================
// Contract violations
// ============================================================================

#[test]
fn test_linear_shape_errors() {
    let (client, device) = create_cpu_client();

    let input = Tensor::<CpuRuntime>::empty(&[2, 3], DType::F32, &device);
    let weight = Tensor::<CpuRuntime>::empty(&[4, 5], DType::F32, &device);
    let out = Tensor::<CpuRuntime>::empty(&[2, 4], DType::F32, &device);
    assert!(matches!(
        client.linear(&out, &input, &weight, None),
        Err(Error::ShapeMismatch { .. })
    ));

    let weight = Tensor::<CpuRuntime>::empty(&[4, 3], DType::F32, &device);
    let bias = Tensor::<CpuRuntime>::empty(&[3], DType::F32, &device);
    assert!(matches!(
        client.linear(&out, &input, &weight, Some(&bias)),
        Err(Error::ShapeMismatch { .. })
    ));

    let bad_out = Tensor::<CpuRuntime>::empty(&[2, 3], DType::F32, &device);
    assert!(matches!(
        client.linear(&bad_out, &input, &weight, None),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn test_linear_rank_and_dtype_errors() {
    let (client, device) = create_cpu_client();

    let input = Tensor::<CpuRuntime>::empty(&[2, 3], DType::F32, &device);
    let weight = Tensor::<CpuRuntime>::empty(&[4, 3], DType::F32, &device);
    let out = Tensor::<CpuRuntime>::empty(&[8], DType::F32, &device);
    assert!(matches!(
        client.linear(&out, &input, &weight, None),
        Err(Error::RankMismatch { op: "linear", arg: "out", .. })
    ));

    let out = Tensor::<CpuRuntime>::empty(&[2, 4], DType::F16, &device);
    assert!(matches!(
        client.linear(&out, &input, &weight, None),
        Err(Error::DTypeMismatch { .. })
    ));

    let input = Tensor::<CpuRuntime>::empty(&[2, 3], DType::F64, &device);
    let weight = Tensor::<CpuRuntime>::empty(&[4, 3], DType::F64, &device);
    let out = Tensor::<CpuRuntime>::empty(&[2, 4], DType::F64, &device);
    assert!(matches!(
        client.linear(&out, &input, &weight, None),
        Err(Error::UnsupportedDType { op: "linear", .. })
    ));
}

#[test]
fn test_linear_rejects_transposed_weight_view() {
    let (client, device) = create_cpu_client();

    let input = Tensor::<CpuRuntime>::empty(&[2, 3], DType::F32, &device);
    let weight_t = Tensor::<CpuRuntime>::empty(&[3, 4], DType::F32, &device);
    let weight = weight_t.permute(&[1, 0]).unwrap();
    let out = Tensor::<CpuRuntime>::zeros(&[2, 4], DType::F32, &device);

    assert!(matches!(
        client.linear(&out, &input, &weight, None),
        Err(Error::NotContiguous { op: "linear", arg: "weight" })
    ));
    assert_eq!(out.to_vec::<f32>(), vec![0.0; 8]);
}
