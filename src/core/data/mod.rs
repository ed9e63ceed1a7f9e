//! # 표 데이터 모듈
//!
//! 합성기의 입력/출력이 되는 컬럼 기반 표와 CSV 입출력

pub mod table;
pub mod csv_io;


pub use table::{Column, ColumnData, ColumnKind, Table};
pub use csv_io::{read_csv, read_csv_from, write_csv, write_csv_to};
