//! TVAE (Tabular Variational AutoEncoder) 라이브러리
//!
//! 연속/범주형 컬럼이 섞인 표 데이터를 학습해 같은 스키마의 합성 행을 생성한다.
//!
//! ```no_run
//! use tvae::{Column, Table, Tvae, TvaeConfig};
//!
//! let table = Table::new(vec![
//!     Column::continuous("age", vec![21.0, 35.0, 48.0, 52.0]),
//!     Column::categorical("city", ["seoul", "busan", "seoul", "daegu"]),
//! ])?;
//!
//! let mut model = Tvae::new(TvaeConfig::new().with_epochs(10).with_batch_size(4))?;
//! model.set_random_state(0);
//! model.fit(&table, &["city"])?;
//! let synthetic = model.sample(100)?;
//! assert_eq!(synthetic.n_columns(), 2);
//! # Ok::<(), tvae::TvaeError>(())
//! ```

pub mod core;

// 핵심 모듈들 재수출
pub use core::{
    // 데이터 구조
    Column, ColumnData, ColumnKind, Table,
    read_csv, read_csv_from, write_csv, write_csv_to,
    // 변환
    DataTransformer, SpanInfo, Activation,
    // 모델
    Tvae, TvaeConfig, ModelStatus, LossHistory, LossRecord, RandomState,
    // 오류
    Result, TvaeError,
};
