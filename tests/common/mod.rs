//! Common test utilities
#![allow(dead_code)]

use half::{bf16, f16};
use infercore::runtime::Runtime;
use infercore::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
use infercore::tensor::Tensor;
use std::sync::Once;

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    init_tracing();
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Install a test-writer subscriber once per test binary
///
/// Honours `RUST_LOG`, e.g. `RUST_LOG=infercore=trace cargo test`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Assert two f32 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Build a bf16 tensor from f32 values
pub fn bf16_tensor(data: &[f32], shape: &[usize], device: &CpuDevice) -> Tensor<CpuRuntime> {
    let data: Vec<bf16> = data.iter().copied().map(bf16::from_f32).collect();
    Tensor::from_slice(&data, shape, device)
}

/// Build an f16 tensor from f32 values
pub fn f16_tensor(data: &[f32], shape: &[usize], device: &CpuDevice) -> Tensor<CpuRuntime> {
    let data: Vec<f16> = data.iter().copied().map(f16::from_f32).collect();
    Tensor::from_slice(&data, shape, device)
}

/// Read a bf16 tensor back as f32
pub fn bf16_to_f32(t: &Tensor<CpuRuntime>) -> Vec<f32> {
    t.to_vec::<bf16>().iter().map(|v| v.to_f32()).collect()
}

/// Read an f16 tensor back as f32
pub fn f16_to_f32(t: &Tensor<CpuRuntime>) -> Vec<f32> {
    t.to_vec::<f16>().iter().map(|v| v.to_f32()).collect()
}
