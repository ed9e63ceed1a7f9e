//! # TVAE 합성기
//!
//! 상태 전이: Uninitialized → Fitting → Fitted. fit은 어느 상태에서든 다시 호출할 수
//! 있으며 이전 가중치와 손실 기록을 버린다. sample/save는 Fitted에서만 가능하다.

use super::persistence::{read_model, write_model, SavedModel, FORMAT_VERSION};
use super::sampler::sample_rows;
use super::trainer::Trainer;
use crate::core::data::Table;
use crate::core::error::{Result, TvaeError};
use crate::core::network::{Decoder, Encoder, ParameterStore, RandomWeights, SnapshotWeights, WeightSource};
use crate::core::systems::{LossHistory, LossRecord, ModelStatus, RandomState, TvaeConfig};
use crate::core::transform::DataTransformer;
use candle_core::Device;
use std::path::Path;

/// 학습이 끝난 모델 구성요소
struct FittedModel {
    transformer: DataTransformer,
    encoder: Encoder,
    decoder: Decoder,
    parameters: ParameterStore,
}

enum ModelState {
    Uninitialized,
    Fitting,
    Fitted(Box<FittedModel>),
}

/// 변분 오토인코더 기반 표 데이터 합성기
pub struct Tvae {
    config: TvaeConfig,
    device: Device,
    random_state: RandomState,
    loss_history: LossHistory,
    state: ModelState,
}

impl Tvae {
    /// 구성 검증 후 모델 생성. RNG는 OS 엔트로피로 시작한다
    pub fn new(config: TvaeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            device: Device::Cpu,
            random_state: RandomState::from_entropy(),
            loss_history: LossHistory::new(),
            state: ModelState::Uninitialized,
        })
    }

    /// JSON 구성 문서로 생성 (알 수 없는 옵션은 오류)
    pub fn from_json_config(json: &str) -> Result<Self> {
        Self::new(TvaeConfig::from_json_str(json)?)
    }

    pub fn config(&self) -> &TvaeConfig {
        &self.config
    }

    pub fn status(&self) -> ModelStatus {
        match self.state {
            ModelState::Uninitialized => ModelStatus::Uninitialized,
            ModelState::Fitting => ModelStatus::Fitting,
            ModelState::Fitted(_) => ModelStatus::Fitted,
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, ModelState::Fitted(_))
    }

    /// 스텝별 (Epoch, Batch, Loss) 기록
    pub fn loss_values(&self) -> &[LossRecord] {
        self.loss_history.records()
    }

    pub fn loss_history(&self) -> &LossHistory {
        &self.loss_history
    }

    pub fn transformer(&self) -> Result<&DataTransformer> {
        Ok(&self.fitted()?.transformer)
    }

    /// 모델 전용 RNG를 시드로 재설정
    pub fn set_random_state(&mut self, seed: u64) {
        self.random_state = RandomState::from_seed(seed);
    }

    /// 표에 맞춰 변환기와 인코더/디코더를 학습
    pub fn fit(&mut self, data: &Table, discrete_columns: &[&str]) -> Result<()> {
        self.state = ModelState::Fitting;
        self.loss_history.clear();

        match self.fit_model(data, discrete_columns) {
            Ok(model) => {
                self.state = ModelState::Fitted(Box::new(model));
                Ok(())
            }
            Err(e) => {
                self.state = ModelState::Uninitialized;
                Err(e)
            }
        }
    }

    fn fit_model(&mut self, data: &Table, discrete_columns: &[&str]) -> Result<FittedModel> {
        let transformer = DataTransformer::fit(data, discrete_columns, &mut self.random_state)?;
        let train_data = transformer.transform(data, &mut self.random_state)?;
        let data_dim = transformer.output_dimensions();

        log::info!(
            "TVAE 학습 시작: {} 행, {} 컬럼 → 변환 폭 {}, {} 에포크",
            data.n_rows(),
            data.n_columns(),
            data_dim,
            self.config.epochs
        );

        let mut parameters = ParameterStore::new();
        let (encoder, decoder) = {
            let mut source = RandomWeights::new(&mut self.random_state, &self.device);
            build_networks(&self.config, data_dim, &mut source, &mut parameters)?
        };

        let spans = transformer.spans();
        Trainer {
            config: &self.config,
            encoder: &encoder,
            decoder: &decoder,
            parameters: parameters.vars(),
            spans: &spans,
            device: &self.device,
        }
        .train(train_data.view(), &mut self.random_state, &mut self.loss_history)?;

        if let Some(last) = self.loss_history.last() {
            log::info!("TVAE 학습 완료: 최종 손실 {:.3}", last.loss);
        }

        Ok(FittedModel {
            transformer,
            encoder,
            decoder,
            parameters,
        })
    }

    /// 합성 데이터 `n`행 생성. 호출할 때마다 RNG 스트림이 진행된다
    pub fn sample(&mut self, n: usize) -> Result<Table> {
        let model = match &self.state {
            ModelState::Fitted(model) => model,
            _ => return Err(TvaeError::NotFitted),
        };
        log::debug!("TVAE 샘플링: {} 행", n);
        sample_rows(
            n,
            self.config.batch_size,
            &model.decoder,
            &model.transformer,
            &mut self.random_state,
            &self.device,
        )
    }

    /// 전체 모델 상태를 파일 하나로 저장
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let model = self.fitted()?;
        let saved = SavedModel {
            format_version: FORMAT_VERSION,
            config: self.config.clone(),
            transformer: model.transformer.clone(),
            parameters: model.parameters.snapshot()?,
            loss_history: self.loss_history.clone(),
            random_state: self.random_state.snapshot(),
        };
        write_model(path.as_ref(), &saved)?;
        log::info!("TVAE 모델 저장: {}", path.as_ref().display());
        Ok(())
    }

    /// 저장된 모델 복원. 이후 sample은 저장 시점의 RNG 상태에서 이어진다
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let saved = read_model(path.as_ref())?;
        let device = Device::Cpu;
        let data_dim = saved.transformer.output_dimensions();

        let mut parameters = ParameterStore::new();
        let mut source = SnapshotWeights::new(saved.parameters, &device);
        let (encoder, decoder) = build_networks(&saved.config, data_dim, &mut source, &mut parameters)?;
        let leftover = source.leftover();
        if !leftover.is_empty() {
            return Err(TvaeError::IncompatibleModel(format!(
                "unexpected parameters: {:?}",
                leftover
            )));
        }

        log::info!("TVAE 모델 불러옴: {}", path.as_ref().display());
        Ok(Self {
            config: saved.config,
            device,
            random_state: RandomState::restore(&saved.random_state),
            loss_history: saved.loss_history,
            state: ModelState::Fitted(Box::new(FittedModel {
                transformer: saved.transformer,
                encoder,
                decoder,
                parameters,
            })),
        })
    }

    fn fitted(&self) -> Result<&FittedModel> {
        match &self.state {
            ModelState::Fitted(model) => Ok(model),
            _ => Err(TvaeError::NotFitted),
        }
    }

    /// 학습된 인코더 (잠재 표현 확인용)
    pub fn encoder(&self) -> Result<&Encoder> {
        Ok(&self.fitted()?.encoder)
    }

    pub fn decoder(&self) -> Result<&Decoder> {
        Ok(&self.fitted()?.decoder)
    }
}

fn build_networks(
    config: &TvaeConfig,
    data_dim: usize,
    source: &mut dyn WeightSource,
    parameters: &mut ParameterStore,
) -> Result<(Encoder, Decoder)> {
    let encoder = Encoder::new(data_dim, &config.compress_dims, config.embedding_dim, source, parameters)?;
    let decoder = Decoder::new(config.embedding_dim, &config.decompress_dims, data_dim, source, parameters)?;
    Ok((encoder, decoder))
}
