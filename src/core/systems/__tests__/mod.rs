//! # 시스템 모듈 테스트

pub mod config_test;
pub mod state_management_test;
