//! # 인코더
//!
//! 변환 공간 벡터 → 잠재 분포 (평균, 로그분산)

use super::dense::{Dense, HiddenStack};
use super::weights::{ParameterStore, WeightSource};
use crate::core::error::Result;
use candle_core::{Module, Tensor};

/// 인코더 순전파 결과
#[derive(Debug, Clone)]
pub struct LatentDistribution {
    pub mu: Tensor,
    pub std: Tensor,
    pub logvar: Tensor,
}

#[derive(Debug, Clone)]
pub struct Encoder {
    hidden: HiddenStack,
    fc_mu: Dense,
    fc_logvar: Dense,
    pub data_dim: usize,
    pub embedding_dim: usize,
}

impl Encoder {
    pub fn new(
        data_dim: usize,
        compress_dims: &[usize],
        embedding_dim: usize,
        source: &mut dyn WeightSource,
        store: &mut ParameterStore,
    ) -> Result<Self> {
        let hidden = HiddenStack::new("encoder.hidden", data_dim, compress_dims, source, store)?;
        let width = hidden.output_width;
        let fc_mu = Dense::new("encoder.mu", width, embedding_dim, source, store)?;
        let fc_logvar = Dense::new("encoder.logvar", width, embedding_dim, source, store)?;

        Ok(Self {
            hidden,
            fc_mu,
            fc_logvar,
            data_dim,
            embedding_dim,
        })
    }

    pub fn forward(&self, xs: &Tensor) -> candle_core::Result<LatentDistribution> {
        let feature = self.hidden.forward(xs)?;
        let mu = self.fc_mu.forward(&feature)?;
        let logvar = self.fc_logvar.forward(&feature)?;
        let std = logvar.affine(0.5, 0.0)?.exp()?;
        Ok(LatentDistribution { mu, std, logvar })
    }
}

/// 재매개변수화: z = μ + σ ⊙ ε
pub fn reparameterize(latent: &LatentDistribution, eps: &Tensor) -> candle_core::Result<Tensor> {
    eps.mul(&latent.std)?.add(&latent.mu)
}
