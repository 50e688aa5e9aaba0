//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに保存する。

use crate::error::{AppError, Result};
use pasiulymas_common::export::excel_core::generate_table_buffer;
use pasiulymas_common::ExportTable;
use std::path::Path;

pub fn write_table(table: &ExportTable, output_path: &Path) -> Result<()> {
    let buffer = generate_table_buffer(table)
        .map_err(|e| AppError::ExcelGeneration(e.to_string()))?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
