//! # 모델 전용 난수 스트림
//!
//! 가중치 초기화, 배치 셔플, 재매개변수화 노이즈, 혼합 모델 초기화,
//! 샘플링 노이즈가 모두 이 스트림 하나에서 나온다. 전역 RNG는 쓰지 않는다.

use candle_core::{Device, Tensor};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// 모델 인스턴스가 소유하는 RNG
#[derive(Debug, Clone)]
pub struct RandomState {
    rng: ChaCha20Rng,
}

/// 저장/복원용 RNG 스냅샷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomStateSnapshot {
    pub seed: [u8; 32],
    pub stream: u64,
    pub word_pos: u128,
}

impl RandomState {
    /// 정수 시드로부터 결정적 스트림 생성
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// OS 엔트로피로 초기화 (시드 미지정 모델의 기본값)
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn snapshot(&self) -> RandomStateSnapshot {
        RandomStateSnapshot {
            seed: self.rng.get_seed(),
            stream: self.rng.get_stream(),
            word_pos: self.rng.get_word_pos(),
        }
    }

    /// 스냅샷 시점부터 스트림 이어가기
    pub fn restore(snapshot: &RandomStateSnapshot) -> Self {
        let mut rng = ChaCha20Rng::from_seed(snapshot.seed);
        rng.set_stream(snapshot.stream);
        rng.set_word_pos(snapshot.word_pos);
        Self { rng }
    }

    pub fn rng(&mut self) -> &mut ChaCha20Rng {
        &mut self.rng
    }

    /// 하위 스트림 생성 (병렬 작업에 컬럼별로 나눠줄 때 사용)
    pub fn fork(&mut self) -> RandomState {
        RandomState::from_seed(self.rng.gen())
    }

    pub fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    /// 표준정규 분포 텐서 (rows, cols)
    pub fn standard_normal_tensor(
        &mut self,
        rows: usize,
        cols: usize,
        device: &Device,
    ) -> candle_core::Result<Tensor> {
        let data: Vec<f32> = (0..rows * cols)
            .map(|_| self.rng.sample::<f32, _>(StandardNormal))
            .collect();
        Tensor::from_vec(data, (rows, cols), device)
    }

    /// [-bound, bound] 균등 분포 값들
    pub fn uniform_values(&mut self, len: usize, bound: f32) -> Vec<f32> {
        (0..len).map(|_| self.rng.gen_range(-bound..=bound)).collect()
    }
}
