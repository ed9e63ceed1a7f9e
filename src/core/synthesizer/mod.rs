//! # 합성기 모듈
//!
//! 손실, 학습 루프, 샘플링, 저장 포맷과 이를 묶는 `Tvae`

pub mod loss;
pub mod trainer;
pub mod sampler;
pub mod persistence;
pub mod tvae;

#[cfg(test)]
mod __tests__;

pub use loss::{vae_loss, LossComponents};
pub use trainer::Trainer;
pub use sampler::sample_rows;
pub use persistence::{read_model, write_model, SavedModel, FORMAT_VERSION, MAGIC};
pub use tvae::Tvae;
