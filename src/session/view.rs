use pasiulymas_common::{CellValue, RowRecord, SelectionStore};

use crate::workbook::ParsedSheet;

/// セル表示の最大文字数
const CELL_WIDTH: usize = 24;

fn clip(text: &str) -> String {
    if text.chars().count() <= CELL_WIDTH {
        text.to_string()
    } else {
        let head: String = text.chars().take(CELL_WIDTH - 1).collect();
        format!("{}…", head)
    }
}

/// セル列を1行の文字列に
pub fn format_cells(cells: &[CellValue]) -> String {
    cells
        .iter()
        .map(|c| clip(&c.to_string()))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// メモリの1行（`[file] cells`）
pub fn format_row(row: &RowRecord) -> String {
    format!("[{}] {}", row.originating_file, format_cells(&row.cells))
}

/// シートの先頭 `limit` 行を表示
pub fn print_sheet_preview(sheet: &ParsedSheet, limit: usize) {
    let headers: Vec<String> = sheet.headers.iter().map(|h| clip(h)).collect();
    println!("     {}", headers.join(" | "));
    for (i, row) in sheet.rows.iter().take(limit).enumerate() {
        println!("{:>4} {}", i, format_cells(row));
    }
    if sheet.rows.len() > limit {
        println!("     ... 他 {}行", sheet.rows.len() - limit);
    }
}

/// メモリの内容を表示
pub fn print_memory(store: &SelectionStore) {
    if store.is_empty() {
        println!("ℹ 選択された行はありません");
        return;
    }
    println!("🧠 メモリ: {}行 ({}ファイル)", store.len(), store.groups().len());
    for (i, row) in store.iter().enumerate() {
        println!("{:>4} {}", i, format_row(row));
    }
}
