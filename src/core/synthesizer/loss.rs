//! # VAE 손실 함수
//!
//! 재구성 손실 = 연속 스칼라의 가우시안 음의 로그우도(디코더 sigma 사용)
//!             + 원-핫 구간의 교차 엔트로피.
//! 두 항을 합쳐 `loss_factor`를 곱하고 배치 크기로 나눈다. KL 항은 따로 반환한다.

use crate::core::transform::{Activation, SpanInfo};
use candle_core::{DType, Tensor, D};
use candle_nn::ops::log_softmax;

/// 배치 하나의 손실 구성요소 (둘 다 스칼라 텐서)
#[derive(Debug, Clone)]
pub struct LossComponents {
    pub reconstruction: Tensor,
    pub kld: Tensor,
}

impl LossComponents {
    pub fn total(&self) -> candle_core::Result<Tensor> {
        self.reconstruction.add(&self.kld)
    }
}

pub fn vae_loss(
    reconstruction: &Tensor,
    real: &Tensor,
    sigmas: &Tensor,
    mu: &Tensor,
    logvar: &Tensor,
    spans: &[SpanInfo],
    loss_factor: f64,
) -> candle_core::Result<LossComponents> {
    let batch = real.dim(0)? as f64;
    let width = real.dim(1)?;

    let mut recon = Tensor::zeros((), DType::F32, real.device())?;
    let mut start = 0;
    for span in spans {
        match span.activation {
            Activation::Tanh => {
                let target = real.narrow(1, start, span.dim)?;
                let predicted = reconstruction.narrow(1, start, span.dim)?.tanh()?;
                let std = sigmas.narrow(0, start, span.dim)?;
                let squared = target
                    .sub(&predicted)?
                    .sqr()?
                    .broadcast_div(&std.sqr()?.affine(2.0, 0.0)?)?
                    .sum_all()?;
                let log_std = std.log()?.sum_all()?.affine(batch, 0.0)?;
                recon = recon.add(&squared)?.add(&log_std)?;
            }
            Activation::Softmax => {
                let logits = reconstruction.narrow(1, start, span.dim)?;
                let target = real.narrow(1, start, span.dim)?;
                let cross_entropy = log_softmax(&logits, D::Minus1)?.mul(&target)?.sum_all()?.neg()?;
                recon = recon.add(&cross_entropy)?;
            }
        }
        start += span.dim;
    }
    if start != width {
        candle_core::bail!("span layout covers {} columns but data has {}", start, width);
    }

    let kld = logvar
        .affine(1.0, 1.0)?
        .sub(&mu.sqr()?)?
        .sub(&logvar.exp()?)?
        .sum_all()?
        .affine(-0.5 / batch, 0.0)?;

    Ok(LossComponents {
        reconstruction: recon.affine(loss_factor / batch, 0.0)?,
        kld,
    })
}
