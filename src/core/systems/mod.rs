//! # 합성기 시스템 모듈
//!
//! 구성, 난수 스트림, 학습 상태, 진행률 표시

pub mod config;
pub mod random_state;
pub mod state_management;
pub mod progress;

// 설정 관련 재수출
pub use config::{TvaeConfig, SIGMA_INIT, SIGMA_MAX, SIGMA_MIN};

// 난수 스트림 재수출
pub use random_state::{RandomState, RandomStateSnapshot};

// 상태 관리 재수출
pub use state_management::{LossHistory, LossRecord, ModelStatus};

pub use progress::{loss_description, progress_line, TrainingProgress};

// 테스트 모듈들
#[cfg(test)]
pub mod __tests__;
