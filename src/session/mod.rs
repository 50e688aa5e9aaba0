//! 行選択セッション
//!
//! 1セッション = 読み込んだブック群 + 選択行ストア（メモリ）。
//! 状態はこの構造体が所有し、各操作（追加・削除・クリア・出力）に渡される。
//! セッション間で共有しない。

mod interactive;
mod view;

pub use interactive::{report_export, run_interactive};
pub use view::{format_cells, format_row};

use crate::error::{AppError, Result};
use crate::export::{export_selection, ExportOutcome};
use crate::workbook::{LoadedWorkbook, ParsedSheet};
use chrono::{DateTime, TimeZone};
use pasiulymas_common::{SelectionStore, TemplateRegistry};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::Path;

/// シートの位置（ブック番号, シート番号）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetKey {
    pub workbook: usize,
    pub sheet: usize,
}

pub struct Session {
    workbooks: Vec<LoadedWorkbook>,
    registry: TemplateRegistry,
    store: SelectionStore,
}

impl Session {
    pub fn new(workbooks: Vec<LoadedWorkbook>, registry: TemplateRegistry) -> Self {
        Self {
            workbooks,
            registry,
            store: SelectionStore::new(),
        }
    }

    pub fn workbooks(&self) -> &[LoadedWorkbook] {
        &self.workbooks
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    /// 全シートのキーと表示名（`file.xlsx -> Sheet`）
    pub fn sheet_choices(&self) -> Vec<(SheetKey, String)> {
        self.workbooks
            .iter()
            .enumerate()
            .flat_map(|(wi, wb)| {
                wb.sheets.iter().enumerate().map(move |(si, sheet)| {
                    (
                        SheetKey { workbook: wi, sheet: si },
                        format!("{} -> {}", wb.file_name, sheet.name),
                    )
                })
            })
            .collect()
    }

    pub fn sheet(&self, key: SheetKey) -> Result<(&LoadedWorkbook, &ParsedSheet)> {
        let workbook = self
            .workbooks
            .get(key.workbook)
            .ok_or_else(|| AppError::SheetNotFound(format!("{:?}", key)))?;
        let sheet = workbook
            .sheets
            .get(key.sheet)
            .ok_or_else(|| AppError::SheetNotFound(format!("{:?}", key)))?;
        Ok((workbook, sheet))
    }

    /// シートの行をメモリに追加（範囲外のインデックスは無視）
    ///
    /// 実際に増えた行数を返す。
    pub fn add_rows(&mut self, key: SheetKey, indices: &[usize]) -> Result<usize> {
        let (workbook, sheet) = self.sheet(key)?;
        let tag = workbook.originating_file.clone();
        let rows = sheet.pick(indices);
        tracing::debug!(file = %tag, sheet = %sheet.name, picked = rows.len(), "adding rows");
        Ok(self.store.append(rows, &tag))
    }

    /// メモリから行を削除（表示順のインデックス、範囲外は無視）
    pub fn remove_rows(&mut self, indices: &BTreeSet<usize>) -> usize {
        self.store.remove(indices)
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn export<Tz>(&self, output_dir: &Path, now: &DateTime<Tz>) -> Result<ExportOutcome>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        export_selection(&self.store, &self.registry, output_dir, now)
    }
}
