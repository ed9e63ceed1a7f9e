//! # 신경망 모듈
//!
//! TVAE 인코더/디코더와 파라미터 관리

pub mod weights;
pub mod dense;
pub mod encoder;
pub mod decoder;


pub use weights::{NamedTensor, ParameterStore, RandomWeights, SnapshotWeights, WeightSource};
pub use dense::{Dense, HiddenStack};
pub use encoder::{reparameterize, Encoder, LatentDistribution};
pub use decoder::Decoder;
