//! CSV 입출력
//!
//! 모든 셀이 `f64`로 파싱되는 컬럼은 연속형, 나머지는 범주형으로 읽는다.

use super::table::{Column, ColumnData, Table};
use crate::core::error::{Result, TvaeError};
use std::io::{Read, Write};
use std::path::Path;

/// 파일에서 표 읽기
pub fn read_csv(path: impl AsRef<Path>) -> Result<Table> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path.as_ref())?;
    read_table(reader)
}

/// 임의의 reader에서 표 읽기
pub fn read_csv_from<R: Read>(source: R) -> Result<Table> {
    let reader = csv::ReaderBuilder::new().has_headers(true).from_reader(source);
    read_table(reader)
}

fn read_table<R: Read>(mut reader: csv::Reader<R>) -> Result<Table> {
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(TvaeError::InvalidData("CSV has no header row".to_string()));
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (col, cell) in record.iter().enumerate().take(headers.len()) {
            cells[col].push(cell.to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::new(name, infer_column(values)))
        .collect();

    Table::new(columns)
}

fn infer_column(values: Vec<String>) -> ColumnData {
    let parsed: Option<Vec<f64>> = values.iter().map(|v| v.trim().parse::<f64>().ok()).collect();
    match parsed {
        Some(numbers) if !numbers.is_empty() => ColumnData::Continuous(numbers),
        _ => ColumnData::Categorical(values),
    }
}

/// 파일로 표 쓰기
pub fn write_csv(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let writer = csv::Writer::from_path(path.as_ref())?;
    write_table(table, writer)
}

/// 임의의 writer로 표 쓰기
pub fn write_csv_to<W: Write>(table: &Table, sink: W) -> Result<()> {
    write_table(table, csv::Writer::from_writer(sink))
}

fn write_table<W: Write>(table: &Table, mut writer: csv::Writer<W>) -> Result<()> {
    writer.write_record(table.column_names())?;
    for row in 0..table.n_rows() {
        writer.write_record(table.columns().iter().map(|c| c.data.display_value(row)))?;
    }
    writer.flush()?;
    Ok(())
}
