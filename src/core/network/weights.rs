//! # 파라미터 저장소와 초기화 소스
//!
//! 레이어는 `WeightSource`에서 텐서를 받아 `Var`로 등록한다. 새 모델은 모델 RNG로
//! 초기화하고, 불러온 모델은 저장된 텐서에서 같은 이름/형상으로 복원한다.

use crate::core::error::{Result, TvaeError};
use crate::core::systems::RandomState;
use candle_core::{Device, Tensor, Var};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 직렬화 가능한 이름 붙은 텐서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedTensor {
    pub name: String,
    pub shape: Vec<usize>,
    pub values: Vec<f32>,
}

/// 레이어 파라미터 공급자
pub trait WeightSource {
    /// `fan_in`은 기본 균등 초기화 범위 계산용
    fn tensor(&mut self, name: &str, shape: &[usize], fan_in: usize) -> Result<Tensor>;

    /// 상수 초기화 파라미터
    fn constant(&mut self, name: &str, shape: &[usize], value: f32) -> Result<Tensor>;
}

/// U(-1/√fan_in, 1/√fan_in) 초기화
pub struct RandomWeights<'a> {
    random_state: &'a mut RandomState,
    device: Device,
}

impl<'a> RandomWeights<'a> {
    pub fn new(random_state: &'a mut RandomState, device: &Device) -> Self {
        Self {
            random_state,
            device: device.clone(),
        }
    }
}

impl WeightSource for RandomWeights<'_> {
    fn tensor(&mut self, _name: &str, shape: &[usize], fan_in: usize) -> Result<Tensor> {
        let bound = 1.0 / (fan_in.max(1) as f32).sqrt();
        let len = shape.iter().product();
        let values = self.random_state.uniform_values(len, bound);
        Ok(Tensor::from_vec(values, shape, &self.device)?)
    }

    fn constant(&mut self, _name: &str, shape: &[usize], value: f32) -> Result<Tensor> {
        let len = shape.iter().product();
        Ok(Tensor::from_vec(vec![value; len], shape, &self.device)?)
    }
}

/// 저장된 텐서에서 복원
pub struct SnapshotWeights {
    tensors: HashMap<String, NamedTensor>,
    device: Device,
}

impl SnapshotWeights {
    pub fn new(tensors: Vec<NamedTensor>, device: &Device) -> Self {
        Self {
            tensors: tensors.into_iter().map(|t| (t.name.clone(), t)).collect(),
            device: device.clone(),
        }
    }

    fn take(&mut self, name: &str, shape: &[usize]) -> Result<Tensor> {
        let saved = self
            .tensors
            .remove(name)
            .ok_or_else(|| TvaeError::IncompatibleModel(format!("missing parameter '{}'", name)))?;
        if saved.shape != shape || saved.values.len() != shape.iter().product::<usize>() {
            return Err(TvaeError::IncompatibleModel(format!(
                "parameter '{}' has shape {:?}, expected {:?}",
                name, saved.shape, shape
            )));
        }
        Ok(Tensor::from_vec(saved.values, shape, &self.device)?)
    }

    /// 사용되지 않고 남은 텐서 이름
    pub fn leftover(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tensors.keys().cloned().collect();
        names.sort();
        names
    }
}

impl WeightSource for SnapshotWeights {
    fn tensor(&mut self, name: &str, shape: &[usize], _fan_in: usize) -> Result<Tensor> {
        self.take(name, shape)
    }

    fn constant(&mut self, name: &str, shape: &[usize], _value: f32) -> Result<Tensor> {
        self.take(name, shape)
    }
}

/// 등록 순서가 유지되는 학습 파라미터 목록
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    vars: Vec<(String, Var)>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 소스에서 텐서를 받아 `Var`로 등록
    pub fn create(
        &mut self,
        source: &mut dyn WeightSource,
        name: &str,
        shape: &[usize],
        fan_in: usize,
    ) -> Result<Var> {
        let tensor = source.tensor(name, shape, fan_in)?;
        self.register(name, tensor)
    }

    pub fn create_constant(
        &mut self,
        source: &mut dyn WeightSource,
        name: &str,
        shape: &[usize],
        value: f32,
    ) -> Result<Var> {
        let tensor = source.constant(name, shape, value)?;
        self.register(name, tensor)
    }

    fn register(&mut self, name: &str, tensor: Tensor) -> Result<Var> {
        let var = Var::from_tensor(&tensor)?;
        self.vars.push((name.to_string(), var.clone()));
        Ok(var)
    }

    pub fn vars(&self) -> Vec<Var> {
        self.vars.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.vars.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// 전체 스칼라 파라미터 수
    pub fn num_parameters(&self) -> usize {
        self.vars.iter().map(|(_, v)| v.as_tensor().elem_count()).sum()
    }

    /// 현재 값 스냅샷
    pub fn snapshot(&self) -> Result<Vec<NamedTensor>> {
        self.vars
            .iter()
            .map(|(name, var)| {
                let tensor = var.as_tensor();
                Ok(NamedTensor {
                    name: name.clone(),
                    shape: tensor.dims().to_vec(),
                    values: tensor.flatten_all()?.to_vec1::<f32>()?,
                })
            })
            .collect()
    }
}
