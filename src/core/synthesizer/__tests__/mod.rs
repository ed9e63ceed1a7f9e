//! # 합성기 모듈 테스트

mod loss_test;
mod trainer_test;
mod tvae_test;
