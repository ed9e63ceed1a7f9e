//! # 디코더
//!
//! 잠재 벡터 → 변환 공간 재구성 + 차원별 출력 스케일 sigma

use super::dense::{Dense, HiddenStack};
use super::weights::{ParameterStore, WeightSource};
use crate::core::error::Result;
use crate::core::systems::SIGMA_INIT;
use candle_core::{Module, Tensor, Var};

#[derive(Debug, Clone)]
pub struct Decoder {
    hidden: HiddenStack,
    output: Dense,
    sigma: Var,
    pub embedding_dim: usize,
    pub data_dim: usize,
}

impl Decoder {
    pub fn new(
        embedding_dim: usize,
        decompress_dims: &[usize],
        data_dim: usize,
        source: &mut dyn WeightSource,
        store: &mut ParameterStore,
    ) -> Result<Self> {
        let hidden = HiddenStack::new("decoder.hidden", embedding_dim, decompress_dims, source, store)?;
        let output = Dense::new("decoder.output", hidden.output_width, data_dim, source, store)?;
        let sigma = store.create_constant(source, "decoder.sigma", &[data_dim], SIGMA_INIT)?;

        Ok(Self {
            hidden,
            output,
            sigma,
            embedding_dim,
            data_dim,
        })
    }

    /// (재구성 로짓, sigma)
    pub fn forward(&self, z: &Tensor) -> candle_core::Result<(Tensor, Tensor)> {
        let reconstruction = self.output.forward(&self.hidden.forward(z)?)?;
        Ok((reconstruction, self.sigma.as_tensor().clone()))
    }

    pub fn sigma(&self) -> &Tensor {
        self.sigma.as_tensor()
    }

    /// 옵티마이저 스텝 후 sigma를 [min, max]로 고정
    pub fn clamp_sigma(&self, min: f32, max: f32) -> candle_core::Result<()> {
        let clamped = self.sigma.as_tensor().clamp(min, max)?;
        self.sigma.set(&clamped)
    }
}
