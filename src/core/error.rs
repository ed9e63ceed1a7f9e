//! # TVAE 오류 타입
//!
//! 라이브러리의 모든 실패는 `TvaeError`로 호출자에게 전달된다.

use thiserror::Error;

/// 합성기 동작 중 발생할 수 있는 오류
#[derive(Debug, Error)]
pub enum TvaeError {
    /// 설정 값이 허용 범위를 벗어남
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// 설정 문서 파싱 실패 (알 수 없는 옵션 포함)
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// fit 이전에 sample/save 호출
    #[error("model is not fitted; call fit() first")]
    NotFitted,

    /// 이산 컬럼 목록에 데이터셋에 없는 이름이 포함됨
    #[error("Invalid columns found: {0:?}")]
    InvalidColumns(Vec<String>),

    /// 입력 데이터 형식 오류
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// fit 때 보지 못한 범주 값
    #[error("column '{column}' has category '{value}' that was not seen during fit")]
    UnknownCategory { column: String, value: String },

    /// 학습 손실이 NaN/Inf가 됨
    #[error("training diverged at epoch {epoch}, batch {batch}: loss = {loss}")]
    TrainingDiverged { epoch: usize, batch: usize, loss: f32 },

    /// 저장 파일이 현재 포맷과 호환되지 않음
    #[error("incompatible model file: {0}")]
    IncompatibleModel(String),

    #[error(transparent)]
    Tensor(#[from] candle_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("model serialization failed: {0}")]
    Serialization(#[from] bincode::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TvaeError>;
