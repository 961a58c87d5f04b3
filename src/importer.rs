//! 価格表ファイルの取り込み
//!
//! PDF解析器が出力した表（CSV / XLSX / JSON）を読み込み、
//! 新しいスナップショットを作成する。

use crate::error::{CotacaoError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use cotacao_common::ingest::{row_from_fields, rows_from_csv_str};
use cotacao_common::{CatalogRow, CatalogSnapshot};
use std::path::Path;

/// 取り込み元の形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Xlsx,
    Json,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" | "txt" => Ok(SourceFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(SourceFormat::Xlsx),
            "json" => Ok(SourceFormat::Json),
            _ => Err(CotacaoError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// ファイルを読み込んでスナップショットを作成
pub fn import_file(path: &Path) -> Result<CatalogSnapshot> {
    let rows = read_rows(path)?;
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string());

    tracing::info!(path = %path.display(), rows = rows.len(), "価格表を読み込み");
    Ok(CatalogSnapshot::from_rows(rows, source)?)
}

/// ファイル形式に応じて行データを読み込み
pub fn read_rows(path: &Path) -> Result<Vec<CatalogRow>> {
    if !path.exists() {
        return Err(CotacaoError::FileNotFound(path.display().to_string()));
    }

    match SourceFormat::from_path(path)? {
        SourceFormat::Csv => {
            let content = std::fs::read_to_string(path)?;
            Ok(rows_from_csv_str(&content)?)
        }
        SourceFormat::Json => {
            let content = std::fs::read_to_string(path)?;
            rows_from_json_str(&content)
        }
        SourceFormat::Xlsx => read_xlsx(path),
    }
}

/// JSON配列から行データを読み込み（読めない行は除外）
fn rows_from_json_str(content: &str) -> Result<Vec<CatalogRow>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(content)?;

    let rows = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<CatalogRow>(value) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!(row = i + 1, error = %e, "読めない行をスキップ");
                None
            }
        })
        .collect();

    Ok(rows)
}

/// 先頭シートを読み込み（1行目はヘッダー）
fn read_xlsx(path: &Path) -> Result<Vec<CatalogRow>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| CotacaoError::XlsxRead(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CotacaoError::XlsxRead("シートがありません".into()))?
        .map_err(|e| CotacaoError::XlsxRead(e.to_string()))?;

    let rows = range
        .rows()
        .skip(1)
        .filter_map(|cells| {
            let texts: Vec<String> = cells.iter().map(cell_text).collect();
            let fields: Vec<&str> = texts.iter().map(String::as_str).collect();
            row_from_fields(&fields)
        })
        .collect();

    Ok(rows)
}

/// セルを文字列化（数値は "120,00" 形式）
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_decimal(*f),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// 小数2桁のブラジル表記（例: 1234.5 → "1.234,50"）
fn format_decimal(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{},{}", sign, grouped, frac_part)
}
