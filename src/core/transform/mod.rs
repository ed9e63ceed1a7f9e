//! # 데이터 변환 모듈
//!
//! 혼합 표 데이터 ↔ 신경망 입력용 고정 폭 행렬

pub mod span;
pub mod gaussian_mixture;
pub mod cluster_normalizer;
pub mod one_hot;
pub mod data_transformer;

#[cfg(test)]
mod __tests__;

pub use span::{total_width, Activation, SpanInfo};
pub use gaussian_mixture::{GaussianMixture, MixtureConfig};
pub use cluster_normalizer::ClusterNormalizer;
pub use one_hot::{Categories, OneHotEncoding};
pub use data_transformer::{ColumnEncoding, ColumnTransformInfo, DataTransformer};
