//! ブック読み込みモジュール
//!
//! calamine でブックを開き、シートごとに「見出し + データ行」に変換する。
//! 全セルが空の行は除去し、残りを 0 から振り直す。

mod cell;

pub use cell::cell_to_value;

use crate::error::{AppError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use indicatif::{ProgressBar, ProgressStyle};
use pasiulymas_common::CellValue;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// 読み込んだ1シート
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSheet {
    pub name: String,
    /// 1行目（見出し）
    pub headers: Vec<String>,
    /// 2行目以降（空行除去済み、全行 `headers.len()` 列）
    pub rows: Vec<Vec<CellValue>>,
}

impl ParsedSheet {
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// 指定インデックスの行を取り出す（範囲外は無視）
    pub fn pick(&self, indices: &[usize]) -> Vec<Vec<CellValue>> {
        indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect()
    }
}

/// 読み込んだブック
#[derive(Debug, Clone)]
pub struct LoadedWorkbook {
    pub file_name: String,
    /// 拡張子を除いたファイル名（出力時のカテゴリ判定に使う）
    pub originating_file: String,
    pub sheets: Vec<ParsedSheet>,
}

/// 読み込み結果（失敗したファイルは個別に保持）
#[derive(Debug, Default)]
pub struct LoadReport {
    pub workbooks: Vec<LoadedWorkbook>,
    pub failures: Vec<AppError>,
}

/// ファイル名から元ファイル名タグを作る（最初の "." より前）
pub fn originating_file_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    match name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name,
    }
}

fn is_workbook_path(path: &Path) -> bool {
    let hidden_lock = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with("~$"))
        .unwrap_or(false);
    !hidden_lock
        && path
            .extension()
            .map(|e| {
                let ext = e.to_string_lossy().to_lowercase();
                WORKBOOK_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false)
}

/// 引数のパスを展開（ディレクトリは直下のブックを名前順に列挙）
pub fn collect_workbook_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if !input.exists() {
            return Err(AppError::FileNotFound(input.display().to_string()));
        }

        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| p.is_file() && is_workbook_path(p))
                .collect();
            found.sort();
            tracing::debug!(dir = %input.display(), count = found.len(), "workbooks found");
            paths.extend(found);
        } else {
            paths.push(input.clone());
        }
    }

    Ok(paths)
}

/// calamine の Range をシートに変換
///
/// Range は最初の使用セルから始まるため、開始位置までを空セルで埋めて A1 起点に戻す。
/// 1行目が空のシートは見出しが全て空になる。
pub fn parse_range(name: &str, range: &Range<Data>) -> ParsedSheet {
    let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
    let col_offset = col_offset as usize;
    let width = if range.is_empty() {
        0
    } else {
        col_offset + range.width()
    };

    let to_cells = |r: &[Data]| -> Vec<CellValue> {
        let mut cells = vec![CellValue::Empty; col_offset];
        cells.extend(r.iter().map(cell_to_value));
        cells.resize(width, CellValue::Empty);
        cells
    };

    let mut rows = range.rows();
    let headers: Vec<String> = if row_offset == 0 {
        rows.next()
            .map(|r| to_cells(r).iter().map(|c| c.to_string()).collect())
            .unwrap_or_default()
    } else {
        vec![String::new(); width]
    };

    let rows: Vec<Vec<CellValue>> = rows
        .map(to_cells)
        .filter(|cells| !cells.iter().all(CellValue::is_empty))
        .collect();

    ParsedSheet {
        name: name.to_string(),
        headers,
        rows,
    }
}

/// ブックを1つ読み込む
pub fn load_workbook(path: &Path) -> Result<LoadedWorkbook> {
    if !path.exists() {
        return Err(AppError::FileNotFound(path.display().to_string()));
    }

    let read_error = |reason: String| AppError::WorkbookRead {
        path: path.display().to_string(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(e.to_string()))?;

    let mut sheets = Vec::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| read_error(format!("{}: {}", sheet_name, e)))?;
        sheets.push(parse_range(&sheet_name, &range));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    tracing::debug!(file = %file_name, sheets = sheets.len(), "workbook loaded");

    Ok(LoadedWorkbook {
        file_name,
        originating_file: originating_file_name(path),
        sheets,
    })
}

/// 複数のブックを読み込む（失敗したファイルは報告して続行）
pub fn load_workbooks(paths: &[PathBuf]) -> LoadReport {
    let progress = ProgressBar::new(paths.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
        progress.set_style(style);
    }

    let mut report = LoadReport::default();
    for path in paths {
        progress.set_message(path.display().to_string());
        match load_workbook(path) {
            Ok(workbook) => report.workbooks.push(workbook),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "workbook skipped");
                report.failures.push(e);
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    report
}
