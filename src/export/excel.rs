//! Excel生成（CLI版）
//!
//! 共通ライブラリでバッファを作り、ファイルに書き出す。

use crate::error::{CotacaoError, Result};
use cotacao_common::export::excel_core::generate_quotation_buffer;
use cotacao_common::BatchResult;
use std::path::Path;

pub fn write_quotation_excel(result: &BatchResult, output_path: &Path) -> Result<()> {
    let buffer = generate_quotation_buffer(result).map_err(CotacaoError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;
    Ok(())
}
