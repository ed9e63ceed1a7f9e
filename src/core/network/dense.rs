//! 완전연결 레이어

use super::weights::{ParameterStore, WeightSource};
use crate::core::error::Result;
use candle_core::{Module, Tensor};
use candle_nn::Linear;

/// `y = x Wᵀ + b`. 가중치는 `ParameterStore`에 등록된 `Var`와 저장소를 공유한다
#[derive(Debug, Clone)]
pub struct Dense {
    linear: Linear,
    pub in_features: usize,
    pub out_features: usize,
}

impl Dense {
    pub fn new(
        name: &str,
        in_features: usize,
        out_features: usize,
        source: &mut dyn WeightSource,
        store: &mut ParameterStore,
    ) -> Result<Self> {
        let weight = store.create(
            source,
            &format!("{}.weight", name),
            &[out_features, in_features],
            in_features,
        )?;
        let bias = store.create(source, &format!("{}.bias", name), &[out_features], in_features)?;

        Ok(Self {
            linear: Linear::new(weight.as_tensor().clone(), Some(bias.as_tensor().clone())),
            in_features,
            out_features,
        })
    }
}

impl Module for Dense {
    fn forward(&self, xs: &Tensor) -> candle_core::Result<Tensor> {
        self.linear.forward(xs)
    }
}

/// ReLU 은닉층 스택
#[derive(Debug, Clone)]
pub struct HiddenStack {
    layers: Vec<Dense>,
    pub output_width: usize,
}

impl HiddenStack {
    pub fn new(
        prefix: &str,
        input_width: usize,
        widths: &[usize],
        source: &mut dyn WeightSource,
        store: &mut ParameterStore,
    ) -> Result<Self> {
        let mut layers = Vec::with_capacity(widths.len());
        let mut current = input_width;
        for (i, &width) in widths.iter().enumerate() {
            layers.push(Dense::new(&format!("{}.{}", prefix, i), current, width, source, store)?);
            current = width;
        }
        Ok(Self { layers, output_width: current })
    }

    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

impl Module for HiddenStack {
    fn forward(&self, xs: &Tensor) -> candle_core::Result<Tensor> {
        let mut hidden = xs.clone();
        for layer in &self.layers {
            hidden = layer.forward(&hidden)?.relu()?;
        }
        Ok(hidden)
    }
}
