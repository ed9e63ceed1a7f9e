//! # 학습 루프
//!
//! 에포크마다 행 순서를 한 번 섞고 겹치지 않는 미니배치로 나눈다 (비복원).
//! 인코딩 → 재매개변수화 → 디코딩 → 손실 → AdamW 스텝 → sigma 고정 → 손실 기록.

use super::loss::vae_loss;
use crate::core::error::{Result, TvaeError};
use crate::core::network::{reparameterize, Decoder, Encoder};
use crate::core::optimizers::build_optimizer;
use crate::core::systems::{LossHistory, RandomState, TrainingProgress, TvaeConfig, SIGMA_MAX, SIGMA_MIN};
use crate::core::transform::SpanInfo;
use candle_core::{Device, Tensor, Var};
use candle_nn::Optimizer;
use ndarray::{ArrayView2, Axis};
use rand::seq::SliceRandom;

/// 학습에 필요한 참조 묶음
pub struct Trainer<'a> {
    pub config: &'a TvaeConfig,
    pub encoder: &'a Encoder,
    pub decoder: &'a Decoder,
    pub parameters: Vec<Var>,
    pub spans: &'a [SpanInfo],
    pub device: &'a Device,
}

impl Trainer<'_> {
    /// 전체 에포크 학습. 스텝마다 `history`에 손실을 추가한다
    pub fn train(
        self,
        data: ArrayView2<'_, f32>,
        random_state: &mut RandomState,
        history: &mut LossHistory,
    ) -> Result<()> {
        let progress = TrainingProgress::new(self.config.epochs, self.config.verbose);
        self.train_with_progress(data, random_state, history, progress)
    }

    /// 진행률 출력 대상을 지정해 학습
    pub fn train_with_progress(
        self,
        data: ArrayView2<'_, f32>,
        random_state: &mut RandomState,
        history: &mut LossHistory,
        mut progress: TrainingProgress,
    ) -> Result<()> {
        let n_rows = data.nrows();
        if n_rows == 0 {
            return Err(TvaeError::InvalidData("no rows to train on".to_string()));
        }

        let mut optimizer = build_optimizer(self.parameters.clone(), &self.config.optimizer_config())?;
        let mut order: Vec<usize> = (0..n_rows).collect();

        for epoch in 0..self.config.epochs {
            order.shuffle(random_state.rng());

            let mut last_loss = 0.0f32;
            for (batch, indices) in order.chunks(self.config.batch_size).enumerate() {
                let real = batch_tensor(data, indices, self.device)?;

                let latent = self.encoder.forward(&real)?;
                let eps = random_state.standard_normal_tensor(
                    indices.len(),
                    self.encoder.embedding_dim,
                    self.device,
                )?;
                let embedding = reparameterize(&latent, &eps)?;
                let (reconstruction, sigmas) = self.decoder.forward(&embedding)?;

                let components = vae_loss(
                    &reconstruction,
                    &real,
                    &sigmas,
                    &latent.mu,
                    &latent.logvar,
                    self.spans,
                    self.config.loss_factor,
                )?;
                let loss = components.total()?;
                let loss_value = loss.to_scalar::<f32>()?;
                if !loss_value.is_finite() {
                    progress.finish();
                    return Err(TvaeError::TrainingDiverged { epoch, batch, loss: loss_value });
                }

                optimizer.backward_step(&loss)?;
                self.decoder.clamp_sigma(SIGMA_MIN, SIGMA_MAX)?;

                history.push(epoch, batch, loss_value);
                last_loss = loss_value;
            }

            log::debug!("에포크 {}/{} 손실 {:.4}", epoch + 1, self.config.epochs, last_loss);
            progress.epoch_finished(last_loss);
        }

        progress.finish();
        Ok(())
    }
}

/// 선택된 행들로 (배치 × 폭) 텐서 구성
fn batch_tensor(data: ArrayView2<'_, f32>, indices: &[usize], device: &Device) -> Result<Tensor> {
    let selected = data.select(Axis(0), indices);
    let width = selected.ncols();
    let values: Vec<f32> = selected.iter().copied().collect();
    Ok(Tensor::from_vec(values, (indices.len(), width), device)?)
}
