//! Excel生成（共通ライブラリ）
//!
//! 組み立て済みの出力表を1シートのExcelとして書き出す。
//! 表全体の見出し行・インデックス列は出力しない（見出しは各ブロックが持つ）。

use crate::assemble::ExportTable;
use crate::error::{Error, Result};
use crate::types::CellValue;
use rust_xlsxwriter::*;

/// 出力シート名
pub const SHEET_NAME: &str = "Sheet1";

/// 1列あたりの最大幅（文字数）
const MAX_COLUMN_WIDTH: usize = 40;

fn row_index(row: usize) -> Result<u32> {
    u32::try_from(row).map_err(|_| Error::Excel(format!("行番号が範囲外: {}", row)))
}

fn col_index(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| Error::Excel(format!("列番号が範囲外: {}", col)))
}

/// 列幅の目安（最長セルの文字数）
fn column_widths(table: &ExportTable) -> Vec<usize> {
    let mut widths = vec![0usize; table.width()];
    for row in &table.rows {
        for (col, cell) in row.iter().enumerate() {
            let len = cell.to_string().chars().count();
            widths[col] = widths[col].max(len.min(MAX_COLUMN_WIDTH));
        }
    }
    widths
}

/// 出力表をExcelバッファに生成
pub fn generate_table_buffer(table: &ExportTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF2F2F2))
        .set_border_bottom(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| Error::Excel(format!("シート名設定エラー: {}", e)))?;

    for (col, width) in column_widths(table).into_iter().enumerate() {
        if width > 0 {
            worksheet
                .set_column_width(col_index(col)?, (width + 2) as f64)
                .map_err(|e| Error::Excel(format!("列幅設定エラー: {}", e)))?;
        }
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let is_header = table.header_rows.contains(&row_idx);
        let r = row_index(row_idx)?;

        for (col_idx, cell) in row.iter().enumerate() {
            let c = col_index(col_idx)?;
            let written = match (cell, is_header) {
                (CellValue::Empty, _) => continue,
                (CellValue::Text(s), true) => worksheet.write_string_with_format(r, c, s, &header_format),
                (CellValue::Text(s), false) => worksheet.write_string(r, c, s),
                (CellValue::Number(v), _) => worksheet.write_number(r, c, *v),
                (CellValue::Bool(b), _) => worksheet.write_boolean(r, c, *b),
            };
            written.map_err(|e| Error::Excel(format!("セル書き込みエラー ({}, {}): {}", r, c, e)))?;
        }
    }

    // バッファに書き出し
    workbook
        .save_to_buffer()
        .map_err(|e| Error::Excel(format!("Excel保存エラー: {}", e)))
}
