//! # 모드별 정규화 (연속 컬럼)
//!
//! 값 x를 혼합 성분 k에 배정하고 `(x - μ_k) / (4 σ_k)` 스칼라와 k의 원-핫으로 표현한다.
//! 성분 k는 사후 확률의 argmax가 아니라 사후 분포에서 모델 RNG로 뽑는다.

use super::gaussian_mixture::{GaussianMixture, MixtureConfig};
use super::span::SpanInfo;
use crate::core::error::Result;
use crate::core::systems::RandomState;
use ndarray::{ArrayView2, ArrayViewMut2};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// 정규화 스칼라 클리핑 범위 (변환 시)
const TRANSFORM_CLIP: f64 = 0.99;
/// 사후 확률 평활화
const PROBABILITY_EPS: f64 = 1e-6;
/// 표준편차 배수
const STD_MULTIPLIER: f64 = 4.0;

/// 연속 컬럼 하나의 학습된 인코딩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterNormalizer {
    /// 사용 성분만 남긴 혼합 모델
    mixture: GaussianMixture,
}

impl ClusterNormalizer {
    pub fn fit(values: &[f64], config: &MixtureConfig, random_state: &mut RandomState) -> Result<Self> {
        let config = MixtureConfig {
            max_components: config.max_components.min(values.len()).max(1),
            ..config.clone()
        };
        let full = GaussianMixture::fit(values, &config, random_state)?;

        let mut valid = full.valid_components(config.weight_threshold);
        if !valid.iter().any(|&v| v) {
            // 모든 성분이 임계값 이하이면 가장 큰 성분 하나는 유지
            let best = full
                .weights
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap_or(0);
            valid[best] = true;
        }

        let pick = |xs: &[f64]| -> Vec<f64> {
            xs.iter().zip(&valid).filter(|(_, &keep)| keep).map(|(x, _)| *x).collect()
        };
        let weights = pick(&full.weights);
        let total: f64 = weights.iter().sum();
        let mixture = GaussianMixture {
            means: pick(&full.means),
            stds: pick(&full.stds),
            weights: weights.iter().map(|w| w / total).collect(),
            converged: full.converged,
        };

        Ok(Self { mixture })
    }

    pub fn n_modes(&self) -> usize {
        self.mixture.n_components()
    }

    pub fn means(&self) -> &[f64] {
        &self.mixture.means
    }

    pub fn stds(&self) -> &[f64] {
        &self.mixture.stds
    }

    /// 스칼라 1칸 + 모드 원-핫
    pub fn output_info(&self) -> Vec<SpanInfo> {
        vec![SpanInfo::tanh(1), SpanInfo::softmax(self.n_modes())]
    }

    pub fn output_dimensions(&self) -> usize {
        1 + self.n_modes()
    }

    /// 값들을 `out`(행 수 × output_dimensions)에 기록
    pub fn transform_into(
        &self,
        values: &[f64],
        mut out: ArrayViewMut2<'_, f32>,
        random_state: &mut RandomState,
    ) {
        let rng = random_state.rng();
        for (row, &x) in values.iter().enumerate() {
            let mut probs = self.mixture.predict_proba(x);
            for p in probs.iter_mut() {
                *p += PROBABILITY_EPS;
            }
            let total: f64 = probs.iter().sum();

            let mut target = rng.gen::<f64>() * total;
            let mut mode = probs.len() - 1;
            for (k, p) in probs.iter().enumerate() {
                if target < *p {
                    mode = k;
                    break;
                }
                target -= p;
            }

            let scaled = (x - self.mixture.means[mode]) / (STD_MULTIPLIER * self.mixture.stds[mode]);
            out[[row, 0]] = scaled.clamp(-TRANSFORM_CLIP, TRANSFORM_CLIP) as f32;
            out[[row, 1 + mode]] = 1.0;
        }
    }

    /// 변환 블록을 원래 값으로 복원. `sigma`가 있으면 스칼라에 가우시안 노이즈 추가
    pub fn inverse_transform(
        &self,
        block: ArrayView2<'_, f32>,
        sigma: Option<f32>,
        random_state: &mut RandomState,
    ) -> Vec<f64> {
        let noise = sigma
            .filter(|s| s.is_finite() && *s > 0.0)
            .and_then(|s| Normal::new(0.0, s as f64).ok());

        block
            .rows()
            .into_iter()
            .map(|row| {
                let mut scaled = row[0] as f64;
                if let Some(dist) = &noise {
                    scaled += dist.sample(random_state.rng());
                }
                let scaled = scaled.clamp(-1.0, 1.0);
                let mode = argmax(row.iter().skip(1).copied());
                scaled * STD_MULTIPLIER * self.mixture.stds[mode] + self.mixture.means[mode]
            })
            .collect()
    }
}

/// 최대값 위치 (동률이면 앞쪽)
pub(crate) fn argmax(values: impl Iterator<Item = f32>) -> usize {
    let mut best = 0;
    let mut best_value = f32::NEG_INFINITY;
    for (i, v) in values.enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}
