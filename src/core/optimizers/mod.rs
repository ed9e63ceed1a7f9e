pub mod config;

pub use config::{AdamConfig, OptimizerConfig};

use candle_core::Var;
use candle_nn::{AdamW, Optimizer};

/// 주어진 파라미터들에 대한 AdamW 생성
pub fn build_optimizer(vars: Vec<Var>, config: &OptimizerConfig) -> candle_core::Result<AdamW> {
    AdamW::new(vars, config.to_params())
}
