//! 컬럼 단위 표 데이터
//!
//! 컬럼 순서는 입력 그대로 유지되며 모든 컬럼의 행 수는 같다.

use crate::core::error::{Result, TvaeError};
use serde::{Deserialize, Serialize};

/// 컬럼의 의미적 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// 실수형
    Continuous,
    /// 문자열 범주형
    Categorical,
}

/// 컬럼 값 저장소
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Continuous(Vec<f64>),
    Categorical(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Continuous(values) => values.len(),
            ColumnData::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Continuous(_) => ColumnKind::Continuous,
            ColumnData::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn as_continuous(&self) -> Option<&[f64]> {
        match self {
            ColumnData::Continuous(values) => Some(values),
            ColumnData::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&[String]> {
        match self {
            ColumnData::Categorical(values) => Some(values),
            ColumnData::Continuous(_) => None,
        }
    }

    /// 행 하나를 문자열로 표현 (오류 메시지, CSV 출력용)
    pub fn display_value(&self, row: usize) -> String {
        match self {
            ColumnData::Continuous(values) => values[row].to_string(),
            ColumnData::Categorical(values) => values[row].clone(),
        }
    }
}

/// 이름이 붙은 컬럼
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self { name: name.into(), data }
    }

    pub fn continuous(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, ColumnData::Continuous(values))
    }

    pub fn categorical<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            name,
            ColumnData::Categorical(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 순서가 있는 컬럼 집합
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// 컬럼 목록으로 표 생성 (행 수 불일치, 중복 이름 거부)
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
                return Err(TvaeError::InvalidData(format!(
                    "column '{}' has {} rows, expected {}",
                    bad.name,
                    bad.len(),
                    rows
                )));
            }
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(TvaeError::InvalidData(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }
        Ok(Self { columns })
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// (행 수, 컬럼 수)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_columns())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn dtypes(&self) -> Vec<ColumnKind> {
        self.columns.iter().map(Column::kind).collect()
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}
