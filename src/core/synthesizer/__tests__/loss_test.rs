use crate::core::synthesizer::vae_loss;
use crate::core::transform::SpanInfo;
use approx::assert_abs_diff_eq;
use candle_core::{Device, Tensor};

fn 텐서(values: &[f32], rows: usize, cols: usize) -> Tensor {
    Tensor::from_vec(values.to_vec(), (rows, cols), &Device::Cpu).unwrap()
}

fn 영벡터(rows: usize, cols: usize) -> Tensor {
    Tensor::zeros((rows, cols), candle_core::DType::F32, &Device::Cpu).unwrap()
}

#[test]
fn 교차_엔트로피_항_테스트() {
    // 균등 로짓 + 원-핫 타깃 → ln 2
    let reconstruction = 텐서(&[0.0, 0.0], 1, 2);
    let real = 텐서(&[1.0, 0.0], 1, 2);
    let sigmas = Tensor::from_vec(vec![0.1f32, 0.1], 2, &Device::Cpu).unwrap();

    let loss = vae_loss(
        &reconstruction,
        &real,
        &sigmas,
        &영벡터(1, 3),
        &영벡터(1, 3),
        &[SpanInfo::softmax(2)],
        2.0,
    )
    .unwrap();

    let recon = loss.reconstruction.to_scalar::<f32>().unwrap();
    assert_abs_diff_eq!(recon, 2.0 * std::f32::consts::LN_2, epsilon = 1e-5);
    assert_abs_diff_eq!(loss.kld.to_scalar::<f32>().unwrap(), 0.0, epsilon = 1e-6);

    println!("✅ 교차 엔트로피 항 테스트 통과: {:.4}", recon);
}

#[test]
fn 가우시안_항_테스트() {
    // tanh(0) = 0, 타깃 0.5, sigma 0.5 → 0.25 / 0.5 + ln 0.5
    let reconstruction = 텐서(&[0.0], 1, 1);
    let real = 텐서(&[0.5], 1, 1);
    let sigmas = Tensor::from_vec(vec![0.5f32], 1, &Device::Cpu).unwrap();

    let loss = vae_loss(
        &reconstruction,
        &real,
        &sigmas,
        &영벡터(1, 2),
        &영벡터(1, 2),
        &[SpanInfo::tanh(1)],
        1.0,
    )
    .unwrap();

    let expected = 0.5 + 0.5f32.ln();
    assert_abs_diff_eq!(loss.reconstruction.to_scalar::<f32>().unwrap(), expected, epsilon = 1e-5);
}

#[test]
fn 쿨백_라이블러_항_테스트() {
    // mu = 1, logvar = 0 → 행마다 0.5 * dim, 배치 평균
    let mu = 텐서(&[1.0, 1.0, 1.0, 1.0], 2, 2);
    let logvar = 영벡터(2, 2);
    let reconstruction = 텐서(&[0.0, 0.0], 2, 1);
    let real = 텐서(&[0.0, 0.0], 2, 1);
    let sigmas = Tensor::from_vec(vec![1.0f32], 1, &Device::Cpu).unwrap();

    let loss = vae_loss(&reconstruction, &real, &sigmas, &mu, &logvar, &[SpanInfo::tanh(1)], 2.0).unwrap();

    assert_abs_diff_eq!(loss.kld.to_scalar::<f32>().unwrap(), 1.0, epsilon = 1e-6);
    // 오차 0, ln(1) = 0
    assert_abs_diff_eq!(loss.total().unwrap().to_scalar::<f32>().unwrap(), 1.0, epsilon = 1e-6);
}

#[test]
fn 구간_폭_불일치_오류_테스트() {
    let reconstruction = 영벡터(1, 3);
    let real = 영벡터(1, 3);
    let sigmas = Tensor::ones(3, candle_core::DType::F32, &Device::Cpu).unwrap();

    let result = vae_loss(
        &reconstruction,
        &real,
        &sigmas,
        &영벡터(1, 2),
        &영벡터(1, 2),
        &[SpanInfo::tanh(1)],
        2.0,
    );
    assert!(result.is_err());
}
