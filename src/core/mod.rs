//! # TVAE 핵심 라이브러리 모듈
//!
//! 혼합 표 데이터 변환, 변분 오토인코더, 학습과 샘플링의 핵심 구성 요소들

pub mod error;
pub mod data;
pub mod transform;
pub mod network;
pub mod optimizers;
pub mod systems;
pub mod synthesizer;

// 주요 타입들 재수출
pub use error::{Result, TvaeError};
pub use data::{read_csv, read_csv_from, write_csv, write_csv_to, Column, ColumnData, ColumnKind, Table};
pub use transform::{Activation, ColumnTransformInfo, DataTransformer, SpanInfo};
pub use network::{Decoder, Encoder, NamedTensor};
pub use optimizers::{AdamConfig, OptimizerConfig};
pub use systems::{
    loss_description, LossHistory, LossRecord, ModelStatus, RandomState, RandomStateSnapshot, TvaeConfig,
};
pub use synthesizer::{SavedModel, Tvae};
