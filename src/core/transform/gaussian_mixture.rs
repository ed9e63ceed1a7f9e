//! # 1차원 가우시안 혼합 모델
//!
//! k-means++ 초기화 → Lloyd 반복 → EM. 혼합 가중치는 희소 디리클레 사전분포의
//! MAP 추정으로 갱신하므로 기여가 거의 없는 성분은 반복 중에 사라진다.

use crate::core::error::{Result, TvaeError};
use crate::core::systems::RandomState;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// 혼합 모델 학습 설정
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureConfig {
    /// 최대 성분 수
    pub max_components: usize,
    /// 이 값 이하의 가중치를 가진 성분은 사용하지 않음
    pub weight_threshold: f64,
    /// 디리클레 집중 파라미터 (1보다 작을수록 희소)
    pub concentration: f64,
    /// 최대 EM 반복 수
    pub max_iterations: usize,
    /// 샘플당 로그우도 변화 수렴 기준
    pub tolerance: f64,
    /// 분산 하한 보정
    pub reg_covar: f64,
}

impl Default for MixtureConfig {
    fn default() -> Self {
        Self {
            max_components: 10,
            weight_threshold: 0.005,
            concentration: 1e-3,
            max_iterations: 100,
            tolerance: 1e-3,
            reg_covar: 1e-6,
        }
    }
}

const KMEANS_ITERATIONS: usize = 10;

/// 학습된 1차원 혼합 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianMixture {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
    pub weights: Vec<f64>,
    pub converged: bool,
}

impl GaussianMixture {
    /// 값들에 혼합 모델 적합
    pub fn fit(values: &[f64], config: &MixtureConfig, random_state: &mut RandomState) -> Result<Self> {
        if values.is_empty() {
            return Err(TvaeError::InvalidData("cannot fit a mixture on an empty column".to_string()));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(TvaeError::InvalidData(format!(
                "continuous column contains a non-finite value ({})",
                bad
            )));
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let mut distinct = values.to_vec();
        distinct.sort_by(|a, b| a.total_cmp(b));
        distinct.dedup();

        let k = config.max_components.min(values.len()).min(distinct.len());
        if k <= 1 || variance <= config.reg_covar {
            // 분산이 없으면 단일 모드로 대체
            return Ok(Self::single(mean, variance, config.reg_covar));
        }

        let centers = kmeans_plus_plus(values, k, random_state);
        let mut mixture = Self::from_kmeans(values, centers, config.reg_covar);
        mixture.run_em(values, config);
        Ok(mixture)
    }

    fn single(mean: f64, variance: f64, reg_covar: f64) -> Self {
        Self {
            means: vec![mean],
            stds: vec![(variance + reg_covar).sqrt()],
            weights: vec![1.0],
            converged: true,
        }
    }

    /// Lloyd 반복으로 초기 중심을 다듬고 군집 통계로 초기 모수 설정
    fn from_kmeans(values: &[f64], mut centers: Vec<f64>, reg_covar: f64) -> Self {
        let mut assignment = vec![0usize; values.len()];
        for _ in 0..KMEANS_ITERATIONS {
            for (slot, &x) in assignment.iter_mut().zip(values) {
                *slot = nearest(&centers, x);
            }
            let mut sums = vec![0.0; centers.len()];
            let mut counts = vec![0usize; centers.len()];
            for (&c, &x) in assignment.iter().zip(values) {
                sums[c] += x;
                counts[c] += 1;
            }
            let mut moved = false;
            for c in 0..centers.len() {
                if counts[c] > 0 {
                    let updated = sums[c] / counts[c] as f64;
                    moved |= updated != centers[c];
                    centers[c] = updated;
                }
            }
            if !moved {
                break;
            }
        }

        for (slot, &x) in assignment.iter_mut().zip(values) {
            *slot = nearest(&centers, x);
        }

        let n = values.len() as f64;
        let mut means = Vec::new();
        let mut stds = Vec::new();
        let mut weights = Vec::new();
        for (c, &center) in centers.iter().enumerate() {
            let members: Vec<f64> = assignment
                .iter()
                .zip(values)
                .filter(|(&a, _)| a == c)
                .map(|(_, &x)| x)
                .collect();
            if members.is_empty() {
                continue;
            }
            let var = members.iter().map(|x| (x - center).powi(2)).sum::<f64>() / members.len() as f64;
            means.push(center);
            stds.push((var + reg_covar).sqrt());
            weights.push(members.len() as f64 / n);
        }

        Self { means, stds, weights, converged: false }
    }

    fn run_em(&mut self, values: &[f64], config: &MixtureConfig) {
        let mut previous = f64::NEG_INFINITY;
        for _ in 0..config.max_iterations {
            let k = self.means.len();
            let (resp, log_likelihood) = self.responsibilities(values);

            let mut nk = vec![0.0; k];
            for row in resp.chunks(k) {
                for (acc, r) in nk.iter_mut().zip(row) {
                    *acc += r;
                }
            }

            // 희소 디리클레 MAP: N_k + α - 1
            let raw: Vec<f64> = nk.iter().map(|&n| (n + config.concentration - 1.0).max(0.0)).collect();
            let total: f64 = raw.iter().sum();

            let mut means = Vec::with_capacity(k);
            let mut stds = Vec::with_capacity(k);
            let mut weights = Vec::with_capacity(k);
            for c in 0..k {
                if raw[c] <= 0.0 || nk[c] <= f64::EPSILON {
                    continue;
                }
                let mu = resp
                    .chunks(k)
                    .zip(values)
                    .map(|(row, x)| row[c] * x)
                    .sum::<f64>()
                    / nk[c];
                let var = resp
                    .chunks(k)
                    .zip(values)
                    .map(|(row, x)| row[c] * (x - mu).powi(2))
                    .sum::<f64>()
                    / nk[c];
                means.push(mu);
                stds.push((var + config.reg_covar).sqrt());
                weights.push(raw[c] / total);
            }

            if means.is_empty() {
                break;
            }
            self.means = means;
            self.stds = stds;
            self.weights = weights;

            let per_sample = log_likelihood / values.len() as f64;
            if (per_sample - previous).abs() < config.tolerance {
                self.converged = true;
                break;
            }
            previous = per_sample;
        }
    }

    /// 행마다 k개의 사후 확률 (행 우선 평탄화)과 전체 로그우도
    fn responsibilities(&self, values: &[f64]) -> (Vec<f64>, f64) {
        let k = self.means.len();
        let mut resp = Vec::with_capacity(values.len() * k);
        let mut log_likelihood = 0.0;
        for &x in values {
            let logs = self.log_weighted_densities(x);
            let lse = log_sum_exp(&logs);
            log_likelihood += lse;
            resp.extend(logs.iter().map(|l| (l - lse).exp()));
        }
        (resp, log_likelihood)
    }

    fn log_weighted_densities(&self, x: f64) -> Vec<f64> {
        self.means
            .iter()
            .zip(&self.stds)
            .zip(&self.weights)
            .map(|((mu, sd), w)| {
                let var = sd * sd;
                w.ln() - 0.5 * (2.0 * PI * var).ln() - (x - mu).powi(2) / (2.0 * var)
            })
            .collect()
    }

    /// 값 하나의 성분별 사후 확률
    pub fn predict_proba(&self, x: f64) -> Vec<f64> {
        let logs = self.log_weighted_densities(x);
        let lse = log_sum_exp(&logs);
        logs.iter().map(|l| (l - lse).exp()).collect()
    }

    pub fn n_components(&self) -> usize {
        self.means.len()
    }

    /// 임계값을 넘는 성분 표시
    pub fn valid_components(&self, threshold: f64) -> Vec<bool> {
        self.weights.iter().map(|&w| w > threshold).collect()
    }
}

fn nearest(centers: &[f64], x: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centers.iter().enumerate() {
        let d = (x - c).abs();
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

/// k-means++ 시딩. 동률/선택은 모델 RNG로 결정
fn kmeans_plus_plus(values: &[f64], k: usize, random_state: &mut RandomState) -> Vec<f64> {
    let rng = random_state.rng();
    let mut centers = Vec::with_capacity(k);
    centers.push(values[rng.gen_range(0..values.len())]);

    let mut dist: Vec<f64> = values.iter().map(|x| (x - centers[0]).powi(2)).collect();
    while centers.len() < k {
        let total: f64 = dist.iter().sum();
        if total <= 0.0 {
            break;
        }
        let mut target = rng.gen::<f64>() * total;
        let mut chosen = values.len() - 1;
        for (i, d) in dist.iter().enumerate() {
            if target < *d {
                chosen = i;
                break;
            }
            target -= d;
        }
        let center = values[chosen];
        centers.push(center);
        for (d, x) in dist.iter_mut().zip(values) {
            *d = d.min((x - center).powi(2));
        }
    }
    centers
}

pub(crate) fn log_sum_exp(logs: &[f64]) -> f64 {
    let max = logs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + logs.iter().map(|l| (l - max).exp()).sum::<f64>().ln()
}
