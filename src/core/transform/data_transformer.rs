//! # 데이터 변환기
//!
//! 컬럼별 인코딩을 묶어 표 ↔ 고정 폭 수치 행렬 변환을 담당한다.
//! 레이아웃(컬럼 순서, 구간 폭, 활성화)은 fit 시점에 한 번 정해진다.

use super::cluster_normalizer::ClusterNormalizer;
use super::gaussian_mixture::MixtureConfig;
use super::one_hot::OneHotEncoding;
use super::span::SpanInfo;
use crate::core::data::{Column, ColumnData, ColumnKind, Table};
use crate::core::error::{Result, TvaeError};
use crate::core::systems::RandomState;
use ndarray::{concatenate, s, Array2, ArrayView2, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// 이 행 수를 넘으면 컬럼 단위 병렬 변환
const PARALLEL_ROW_THRESHOLD: usize = 500;

/// 컬럼 하나의 학습된 인코딩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnEncoding {
    Continuous(ClusterNormalizer),
    Discrete(OneHotEncoding),
}

/// 컬럼별 변환 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformInfo {
    pub column_name: String,
    /// 원본 컬럼 타입 (역변환 결과 타입)
    pub column_kind: ColumnKind,
    pub encoding: ColumnEncoding,
    pub output_info: Vec<SpanInfo>,
    pub output_dimensions: usize,
}

/// 표 ↔ 변환 행렬
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTransformer {
    columns: Vec<ColumnTransformInfo>,
    output_dimensions: usize,
}

impl DataTransformer {
    /// 기본 혼합 설정으로 학습
    pub fn fit(table: &Table, discrete_columns: &[&str], random_state: &mut RandomState) -> Result<Self> {
        Self::fit_with_config(table, discrete_columns, &MixtureConfig::default(), random_state)
    }

    pub fn fit_with_config(
        table: &Table,
        discrete_columns: &[&str],
        mixture_config: &MixtureConfig,
        random_state: &mut RandomState,
    ) -> Result<Self> {
        let names = table.column_names();
        let mut missing: Vec<String> = discrete_columns
            .iter()
            .filter(|d| !names.contains(*d))
            .map(|d| d.to_string())
            .collect();
        if !missing.is_empty() {
            missing.sort();
            missing.dedup();
            return Err(TvaeError::InvalidColumns(missing));
        }
        if table.n_rows() == 0 {
            return Err(TvaeError::InvalidData("cannot fit on a table with no rows".to_string()));
        }

        let mut columns = Vec::with_capacity(table.n_columns());
        for column in table.columns() {
            let info = if discrete_columns.contains(&column.name.as_str()) {
                let encoding = OneHotEncoding::fit(&column.data)?;
                ColumnTransformInfo {
                    column_name: column.name.clone(),
                    column_kind: column.kind(),
                    output_info: encoding.output_info(),
                    output_dimensions: encoding.output_dimensions(),
                    encoding: ColumnEncoding::Discrete(encoding),
                }
            } else {
                let values = continuous_values(column)?;
                let encoding = ClusterNormalizer::fit(values, mixture_config, random_state)?;
                log::debug!("연속 컬럼 '{}': {} 모드", column.name, encoding.n_modes());
                ColumnTransformInfo {
                    column_name: column.name.clone(),
                    column_kind: ColumnKind::Continuous,
                    output_info: encoding.output_info(),
                    output_dimensions: encoding.output_dimensions(),
                    encoding: ColumnEncoding::Continuous(encoding),
                }
            };
            columns.push(info);
        }

        let output_dimensions = columns.iter().map(|c| c.output_dimensions).sum();
        Ok(Self { columns, output_dimensions })
    }

    pub fn output_dimensions(&self) -> usize {
        self.output_dimensions
    }

    /// 컬럼별 구간 레이아웃
    pub fn output_info(&self) -> Vec<Vec<SpanInfo>> {
        self.columns.iter().map(|c| c.output_info.clone()).collect()
    }

    /// 모든 구간을 순서대로 펼친 목록
    pub fn spans(&self) -> Vec<SpanInfo> {
        self.columns.iter().flat_map(|c| c.output_info.iter().copied()).collect()
    }

    pub fn column_infos(&self) -> &[ColumnTransformInfo] {
        &self.columns
    }

    /// 표를 (행 수 × output_dimensions) 행렬로 변환
    pub fn transform(&self, table: &Table, random_state: &mut RandomState) -> Result<Array2<f32>> {
        let n_rows = table.n_rows();
        let sources: Vec<&Column> = self
            .columns
            .iter()
            .map(|info| {
                table
                    .column(&info.column_name)
                    .ok_or_else(|| TvaeError::InvalidColumns(vec![info.column_name.clone()]))
            })
            .collect::<Result<_>>()?;

        // 스케줄링과 무관하게 같은 결과가 나오도록 하위 스트림을 먼저 나눠준다
        let forks: Vec<RandomState> = self.columns.iter().map(|_| random_state.fork()).collect();

        let encode = |((info, column), mut rng): ((&ColumnTransformInfo, &&Column), RandomState)| -> Result<Array2<f32>> {
            let mut block = Array2::<f32>::zeros((n_rows, info.output_dimensions));
            match &info.encoding {
                ColumnEncoding::Continuous(normalizer) => {
                    normalizer.transform_into(continuous_values(column)?, block.view_mut(), &mut rng);
                }
                ColumnEncoding::Discrete(encoding) => {
                    encoding.transform_into(&info.column_name, &column.data, block.view_mut())?;
                }
            }
            Ok(block)
        };

        let blocks: Vec<Array2<f32>> = if n_rows > PARALLEL_ROW_THRESHOLD {
            self.columns
                .par_iter()
                .zip(sources.par_iter())
                .zip(forks.into_par_iter())
                .map(encode)
                .collect::<Result<_>>()?
        } else {
            self.columns
                .iter()
                .zip(sources.iter())
                .zip(forks)
                .map(encode)
                .collect::<Result<_>>()?
        };

        if blocks.is_empty() {
            return Ok(Array2::zeros((n_rows, 0)));
        }
        let views: Vec<ArrayView2<'_, f32>> = blocks.iter().map(|b| b.view()).collect();
        concatenate(Axis(1), &views)
            .map_err(|e| TvaeError::InvalidData(format!("failed to assemble transformed matrix: {}", e)))
    }

    /// 변환 행렬을 원래 컬럼 구성의 표로 복원
    ///
    /// `sigmas`는 변환 공간 폭만큼의 표준편차. 연속 스칼라 위치의 값만 사용한다.
    pub fn inverse_transform(
        &self,
        data: ArrayView2<'_, f32>,
        sigmas: Option<&[f32]>,
        random_state: &mut RandomState,
    ) -> Result<Table> {
        if data.ncols() != self.output_dimensions {
            return Err(TvaeError::InvalidData(format!(
                "expected {} transformed columns, got {}",
                self.output_dimensions,
                data.ncols()
            )));
        }
        if let Some(s) = sigmas {
            if s.len() != self.output_dimensions {
                return Err(TvaeError::InvalidData(format!(
                    "expected {} sigmas, got {}",
                    self.output_dimensions,
                    s.len()
                )));
            }
        }

        let mut start = 0;
        let mut columns = Vec::with_capacity(self.columns.len());
        for info in &self.columns {
            let block = data.slice(s![.., start..start + info.output_dimensions]);
            let values = match &info.encoding {
                ColumnEncoding::Continuous(normalizer) => {
                    let sigma = sigmas.map(|s| s[start]);
                    ColumnData::Continuous(normalizer.inverse_transform(block, sigma, random_state))
                }
                ColumnEncoding::Discrete(encoding) => encoding.inverse_transform(block),
            };
            columns.push(Column::new(info.column_name.clone(), values));
            start += info.output_dimensions;
        }

        Table::new(columns)
    }
}

fn continuous_values(column: &Column) -> Result<&[f64]> {
    column.data.as_continuous().ok_or_else(|| {
        TvaeError::InvalidData(format!(
            "column '{}' is not numeric; list it in discrete_columns",
            column.name
        ))
    })
}
