//! # 원-핫 인코딩 (이산 컬럼)
//!
//! 범주는 처음 등장한 순서대로 번호를 받는다. 숫자 컬럼을 이산으로 지정하면
//! 범주도 숫자로 유지되어 샘플 출력의 타입이 보존된다.

use super::cluster_normalizer::argmax;
use super::span::SpanInfo;
use crate::core::data::ColumnData;
use crate::core::error::{Result, TvaeError};
use ndarray::{ArrayView2, ArrayViewMut2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 학습된 범주 집합
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Categories {
    Labels(Vec<String>),
    Numbers(Vec<f64>),
}

impl Categories {
    pub fn len(&self) -> usize {
        match self {
            Categories::Labels(labels) => labels.len(),
            Categories::Numbers(numbers) => numbers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 이산 컬럼 하나의 학습된 인코딩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoding {
    categories: Categories,
}

impl OneHotEncoding {
    pub fn fit(data: &ColumnData) -> Result<Self> {
        let categories = match data {
            ColumnData::Categorical(values) => Categories::Labels(first_seen(values, |v| v.clone())),
            ColumnData::Continuous(values) => {
                if let Some(bad) = values.iter().find(|v| v.is_nan()) {
                    return Err(TvaeError::InvalidData(format!(
                        "discrete column contains an invalid number ({})",
                        bad
                    )));
                }
                Categories::Numbers(first_seen(values, |v| v.to_bits()))
            }
        };
        if categories.is_empty() {
            return Err(TvaeError::InvalidData(
                "cannot fit a discrete column with no rows".to_string(),
            ));
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    pub fn output_info(&self) -> Vec<SpanInfo> {
        vec![SpanInfo::softmax(self.categories.len())]
    }

    pub fn output_dimensions(&self) -> usize {
        self.categories.len()
    }

    /// 컬럼 값들을 `out`에 원-핫으로 기록. 학습 때 없던 범주는 오류
    pub fn transform_into(
        &self,
        column: &str,
        data: &ColumnData,
        mut out: ArrayViewMut2<'_, f32>,
    ) -> Result<()> {
        match (&self.categories, data) {
            (Categories::Labels(labels), ColumnData::Categorical(values)) => {
                let index: HashMap<&str, usize> =
                    labels.iter().enumerate().map(|(i, l)| (l.as_str(), i)).collect();
                for (row, value) in values.iter().enumerate() {
                    let slot = index.get(value.as_str()).ok_or_else(|| unknown(column, value))?;
                    out[[row, *slot]] = 1.0;
                }
            }
            (Categories::Numbers(numbers), ColumnData::Continuous(values)) => {
                let index: HashMap<u64, usize> =
                    numbers.iter().enumerate().map(|(i, n)| (n.to_bits(), i)).collect();
                for (row, value) in values.iter().enumerate() {
                    let slot = index.get(&value.to_bits()).ok_or_else(|| unknown(column, value))?;
                    out[[row, *slot]] = 1.0;
                }
            }
            _ => {
                return Err(TvaeError::InvalidData(format!(
                    "column '{}' changed type since fit",
                    column
                )))
            }
        }
        Ok(())
    }

    /// argmax로 범주 복원
    pub fn inverse_transform(&self, block: ArrayView2<'_, f32>) -> ColumnData {
        let picks = block.rows().into_iter().map(|row| argmax(row.iter().copied()));
        match &self.categories {
            Categories::Labels(labels) => ColumnData::Categorical(picks.map(|i| labels[i].clone()).collect()),
            Categories::Numbers(numbers) => ColumnData::Continuous(picks.map(|i| numbers[i]).collect()),
        }
    }
}

fn first_seen<T: Clone, K: Eq + std::hash::Hash>(values: &[T], key: impl Fn(&T) -> K) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    values.iter().filter(|v| seen.insert(key(v))).cloned().collect()
}

fn unknown(column: &str, value: impl ToString) -> TvaeError {
    TvaeError::UnknownCategory {
        column: column.to_string(),
        value: value.to_string(),
    }
}
