//! # 합성기 구성 설정
//!
//! TVAE 학습 하이퍼파라미터. 알 수 없는 옵션과 범위를 벗어난 값은
//! 모델 생성 시점에 바로 거부된다.

use crate::core::error::{Result, TvaeError};
use crate::core::optimizers::{AdamConfig, OptimizerConfig};
use serde::{Deserialize, Serialize};

/// 디코더 sigma 하한
pub const SIGMA_MIN: f32 = 0.01;
/// 디코더 sigma 상한
pub const SIGMA_MAX: f32 = 1.0;
/// 디코더 sigma 초기값
pub const SIGMA_INIT: f32 = 0.1;

/// TVAE 구성
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TvaeConfig {
    /// 잠재 공간 차원
    pub embedding_dim: usize,
    /// 인코더 은닉층 크기들
    pub compress_dims: Vec<usize>,
    /// 디코더 은닉층 크기들
    pub decompress_dims: Vec<usize>,
    /// 가중치 감소 계수
    pub l2scale: f64,
    /// 배치 크기
    pub batch_size: usize,
    /// 에포크 수
    pub epochs: usize,
    /// 재구성 손실 가중치
    pub loss_factor: f64,
    /// 학습률
    pub learning_rate: f64,
    /// 진행률 출력 여부
    pub verbose: bool,
}

impl Default for TvaeConfig {
    fn default() -> Self {
        Self {
            embedding_dim: 128,
            compress_dims: vec![128, 128],
            decompress_dims: vec![128, 128],
            l2scale: 1e-5,
            batch_size: 500,
            epochs: 300,
            loss_factor: 2.0,
            learning_rate: 1e-3,
            verbose: false,
        }
    }
}

impl TvaeConfig {
    /// 새 구성 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON 문서에서 구성 읽기. 누락된 필드는 기본값, 모르는 필드는 오류
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TvaeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_embedding_dim(mut self, dim: usize) -> Self {
        self.embedding_dim = dim;
        self
    }

    pub fn with_compress_dims(mut self, dims: Vec<usize>) -> Self {
        self.compress_dims = dims;
        self
    }

    pub fn with_decompress_dims(mut self, dims: Vec<usize>) -> Self {
        self.decompress_dims = dims;
        self
    }

    pub fn with_l2scale(mut self, l2scale: f64) -> Self {
        self.l2scale = l2scale;
        self
    }

    pub fn with_loss_factor(mut self, factor: f64) -> Self {
        self.loss_factor = factor;
        self
    }

    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 값 범위 검증
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(invalid("epochs must be at least 1"));
        }
        if self.batch_size < 2 || self.batch_size % 2 != 0 {
            return Err(invalid(format!(
                "batch_size must be an even number >= 2, got {}",
                self.batch_size
            )));
        }
        if self.embedding_dim == 0 {
            return Err(invalid("embedding_dim must be at least 1"));
        }
        if self.compress_dims.iter().chain(&self.decompress_dims).any(|&d| d == 0) {
            return Err(invalid("hidden layer widths must be at least 1"));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(invalid(format!("learning_rate must be positive, got {}", self.learning_rate)));
        }
        if !(self.loss_factor.is_finite() && self.loss_factor > 0.0) {
            return Err(invalid(format!("loss_factor must be positive, got {}", self.loss_factor)));
        }
        if !(self.l2scale.is_finite() && self.l2scale >= 0.0) {
            return Err(invalid(format!("l2scale must be non-negative, got {}", self.l2scale)));
        }
        Ok(())
    }

    /// 옵티마이저 구성으로 변환
    pub fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig::new()
            .with_adam_config(AdamConfig::default())
            .with_learning_rate(self.learning_rate)
            .with_weight_decay(self.l2scale)
    }
}

fn invalid(message: impl Into<String>) -> TvaeError {
    TvaeError::InvalidConfig(message.into())
}
