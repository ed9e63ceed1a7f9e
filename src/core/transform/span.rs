//! 변환 공간의 출력 레이아웃

use serde::{Deserialize, Serialize};

/// 구간 활성화 종류. 손실 함수가 회귀/교차엔트로피를 고르는 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// 정규화된 연속 스칼라
    Tanh,
    /// 원-핫 구간
    Softmax,
}

/// 변환 벡터의 연속된 구간 하나
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanInfo {
    pub dim: usize,
    pub activation: Activation,
}

impl SpanInfo {
    pub fn tanh(dim: usize) -> Self {
        Self { dim, activation: Activation::Tanh }
    }

    pub fn softmax(dim: usize) -> Self {
        Self { dim, activation: Activation::Softmax }
    }
}

/// 구간 목록의 전체 폭
pub fn total_width(spans: &[SpanInfo]) -> usize {
    spans.iter().map(|s| s.dim).sum()
}
